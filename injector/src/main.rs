#[cfg(windows)]
mod cli;
#[cfg(windows)]
mod inject;
#[cfg(windows)]
mod native;

#[cfg(windows)]
fn main() {
    cli::start();
}

#[cfg(not(windows))]
fn main() {
    eprintln!("windowhider only supports Windows");
    std::process::exit(1);
}
