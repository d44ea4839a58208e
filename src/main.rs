use log::error;
use shopclerk::config::{get_config, initialize_config};
use shopclerk::constants::INITIALIZE_ERROR_MESSAGE;
use shopclerk::utils::build_error_message;
use shopclerk::{app, logging};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Err(e) = initialize_config() {
        eprintln!("{}", build_error_message(INITIALIZE_ERROR_MESSAGE));
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let config = get_config();

    let _logger = match logging::init_logging(&config.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{}", build_error_message(INITIALIZE_ERROR_MESSAGE));
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app::run(&config).await {
        error!("{}", e);
        eprintln!("{}", build_error_message(e.user_message()));
        std::process::exit(1);
    }
}
