#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failure reading unified dataset file: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure reading unified dataset CSV: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
    #[error("malformed row {row}: {message}")]
    InputFormatError { row: usize, message: String },
}
