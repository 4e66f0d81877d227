use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match dm_portal_lib::run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
