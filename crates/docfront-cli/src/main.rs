use std::process;

fn main() {
    match docfront_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("docfront error: {err}");
            process::exit(1);
        }
    }
}
