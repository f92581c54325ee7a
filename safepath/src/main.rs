use clap::{Parser, Subcommand};
use log::error;
use safepath::app::{
    empty_feature_collection, export_route_geojson, Algorithm, AppError, SafePathRouter,
};
use safepath::server;
use safepath_core::util::geo::parse_coordinate;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "SafePath safety-aware walking router", long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// serve the HTTP API
    Serve {
        /// unified street dataset CSV
        #[arg(short, long, value_name = "*.csv")]
        data: PathBuf,

        /// socket address to bind
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    /// compute one route and print or export it as GeoJSON
    Route {
        /// unified street dataset CSV
        #[arg(short, long, value_name = "*.csv")]
        data: PathBuf,

        /// origin as "lon,lat"
        #[arg(long)]
        origin: String,

        /// destination as "lon,lat"
        #[arg(long)]
        dest: String,

        #[arg(long, default_value = "combined")]
        optimization: String,

        #[arg(long, default_value = "dijkstra")]
        algorithm: String,

        /// write the GeoJSON document here instead of stdout
        #[arg(short, long, value_name = "*.geojson")]
        output: Option<PathBuf>,
    },
    /// run every algorithm over one query and export per-algorithm GeoJSON
    Compare {
        /// unified street dataset CSV
        #[arg(short, long, value_name = "*.csv")]
        data: PathBuf,

        /// origin as "lon,lat"
        #[arg(long)]
        origin: String,

        /// destination as "lon,lat"
        #[arg(long)]
        dest: String,

        #[arg(long, default_value = "combined")]
        optimization: String,

        /// directory for the route_<algorithm>.geojson files
        #[arg(long, default_value = "routes")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), AppError> {
    match args.command {
        Command::Serve { data, addr } => {
            let router = Arc::new(SafePathRouter::from_csv(&data)?);
            server::serve(router, addr).await
        }
        Command::Route {
            data,
            origin,
            dest,
            optimization,
            algorithm,
            output,
        } => {
            let router = SafePathRouter::from_csv(&data)?;
            let origin = parse_lon_lat(&origin)?;
            let dest = parse_lon_lat(&dest)?;

            let document = match router.route(origin, dest, &optimization, &algorithm) {
                Ok(result) => router.route_geojson(&result)?,
                Err(e) => {
                    log::warn!("no route produced: {}", e);
                    empty_feature_collection()
                }
            };
            match output {
                Some(path) => export_route_geojson(&document, &path),
                None => {
                    println!("{}", serde_json::to_string_pretty(&document)?);
                    Ok(())
                }
            }
        }
        Command::Compare {
            data,
            origin,
            dest,
            optimization,
            output_dir,
        } => {
            let router = SafePathRouter::from_csv(&data)?;
            let origin = parse_lon_lat(&origin)?;
            let dest = parse_lon_lat(&dest)?;

            for algorithm in Algorithm::all() {
                let label = algorithm.label();
                match router.route(origin, dest, &optimization, label) {
                    Ok(result) => {
                        let document = router.route_geojson(&result)?;
                        let path = output_dir.join(format!("route_{}.geojson", label));
                        export_route_geojson(&document, &path)?;
                    }
                    Err(e) => log::warn!("{} produced no exportable route: {}", label, e),
                }
            }
            Ok(())
        }
    }
}

fn parse_lon_lat(text: &str) -> Result<(f64, f64), AppError> {
    let coordinate =
        parse_coordinate(text).map_err(AppError::InvalidQuery)?;
    Ok((coordinate.x, coordinate.y))
}
