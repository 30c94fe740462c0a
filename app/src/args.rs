//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use gleaner_core::gltf::{AssembleOptions, ErrorPolicy, StreamMismatch, UnknownIndexType};

/// Extract interleaved vertex and index arrays from a glTF file.
#[derive(Parser, Debug)]
#[command(
    name = "gleaner",
    about = "Extract interleaved mesh geometry from a glTF file",
    long_about = "Loads a .gltf document, walks every node that references a mesh and \
        assembles each primitive into an interleaved vertex array \
        ([x, y, z, a, b, c] per vertex) plus a u32 index array.\n\n\
        Points interleave POSITION with COLOR_0. Triangles interleave POSITION \
        with NORMAL and require an index accessor.\n\n\
        EXAMPLES:\n\
          # Summarize every primitive\n\
          gleaner model.gltf\n\
        \n\
          # Stop at the first broken primitive and print the arrays\n\
          gleaner model.gltf --fail-fast --dump",
    version
)]
pub struct Args {
    /// Path to the .gltf file.
    pub file: PathBuf,

    /// Abort on the first primitive that fails to assemble.
    #[arg(long)]
    pub fail_fast: bool,

    /// Truncate point primitives whose POSITION and COLOR_0 streams differ
    /// in length instead of rejecting them.
    #[arg(long)]
    pub truncate_streams: bool,

    /// Treat index accessors that are neither u16 nor u32 as empty.
    #[arg(long)]
    pub lenient_index_types: bool,

    /// Print the vertex and index arrays of every assembled primitive.
    #[arg(long)]
    pub dump: bool,
}

impl Args {
    /// Assembly options selected by the flags.
    pub fn options(&self) -> AssembleOptions {
        let mut options = AssembleOptions::default();
        if self.fail_fast {
            options = options.with_error_policy(ErrorPolicy::Abort);
        }
        if self.truncate_streams {
            options = options.with_stream_mismatch(StreamMismatch::Truncate);
        }
        if self.lenient_index_types {
            options = options.with_unknown_index_type(UnknownIndexType::Empty);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["gleaner", "model.gltf"]).unwrap();
        assert_eq!(args.file, PathBuf::from("model.gltf"));
        assert!(!args.dump);
        assert_eq!(args.options(), AssembleOptions::default());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::try_parse_from([
            "gleaner",
            "model.gltf",
            "--fail-fast",
            "--truncate-streams",
            "--lenient-index-types",
        ])
        .unwrap();
        assert_eq!(args.options(), AssembleOptions::legacy());
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["gleaner"]).is_err());
    }
}
