/// Image stack to PLY point cloud converter entry point
mod args;

use args::Args;
use image_stack_pre_processing::{ImageStackConverter, logging};

fn main() {
    let args = Args::parse_args();
    logging::enable_tracing(args.verbose);

    let mut converter = ImageStackConverter::new(&args.input, &args.ply, args.settings());
    if let Some(manifest) = &args.manifest {
        converter = converter.with_manifest(manifest);
    }

    if let Err(e) = converter.convert() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
