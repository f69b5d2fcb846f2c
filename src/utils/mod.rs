mod readers;

pub use readers::{open_input_reader, read_annotations, read_fasta, read_request};

pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
