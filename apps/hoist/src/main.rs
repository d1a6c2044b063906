mod cli;

use std::process;

#[tokio::main]
async fn main() {
    let code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", console::style("error:").red().bold(), e);
            cli::EXIT_FAILURE
        }
    };
    process::exit(code);
}
