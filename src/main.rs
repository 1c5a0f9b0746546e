use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    tokio::runtime::Builder::new_multi_thread()
        .thread_name("core-management")
        .enable_all()
        .build()?
        .block_on(core_management::app::run())
}
