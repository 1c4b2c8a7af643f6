/// Streaming ASCII PLY writer with a reserved vertex-count field.
use crate::error::{ConversionError, Result};
use constants::ply::{
    MAX_VERTEX_COUNT, PLY_HEADER_PREFIX, PLY_HEADER_SUFFIX, VERTEX_COUNT_OFFSET,
    VERTEX_COUNT_WIDTH,
};
use constants::sampling::POSITION_DECIMALS;
use std::fs::{self, Permissions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Writes point records into a temporary file beside the destination.
/// Nothing appears at the destination path until [`PlyWriter::finalize`] succeeds;
/// dropping the writer early discards the partial file.
pub struct PlyWriter {
    output_path: PathBuf,
    file: BufWriter<NamedTempFile>,
    points_written: u64,
}

impl PlyWriter {
    /// Opens the temporary output and writes the header with a zeroed count.
    pub fn create(output_path: &Path) -> Result<Self> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = tempfile::Builder::new()
            .prefix(".img2ply-")
            .suffix(".ply.partial")
            .tempfile_in(dir)
            .map_err(|e| ConversionError::io(dir, e))?;
        debug!("streaming points to {}", temp.path().display());

        let mut writer = Self {
            output_path: output_path.to_path_buf(),
            file: BufWriter::new(temp),
            points_written: 0,
        };
        writer.write_header()?;
        Ok(writer)
    }

    fn write_header(&mut self) -> Result<()> {
        let header = format!(
            "{}{}{}",
            PLY_HEADER_PREFIX,
            format_vertex_count(0),
            PLY_HEADER_SUFFIX
        );
        self.file
            .write_all(header.as_bytes())
            .map_err(|e| ConversionError::io(&self.output_path, e))
    }

    /// Appends one `x y z r g b` record.
    pub fn write_point(&mut self, position: [f64; 3], colour: [u8; 3]) -> Result<()> {
        if self.points_written >= MAX_VERTEX_COUNT {
            return Err(ConversionError::VertexCountOverflow(self.points_written + 1));
        }

        writeln!(
            self.file,
            "{} {} {} {} {} {}",
            format_coordinate(position[0]),
            format_coordinate(position[1]),
            format_coordinate(position[2]),
            colour[0],
            colour[1],
            colour[2]
        )
        .map_err(|e| ConversionError::io(&self.output_path, e))?;

        self.points_written += 1;
        Ok(())
    }

    pub fn points_written(&self) -> u64 {
        self.points_written
    }

    /// Patches the vertex count in place and moves the file onto the destination.
    pub fn finalize(self, vertex_count: u64) -> Result<PathBuf> {
        if vertex_count != self.points_written {
            return Err(ConversionError::VertexCountMismatch {
                declared: vertex_count,
                written: self.points_written,
            });
        }
        if vertex_count > MAX_VERTEX_COUNT {
            return Err(ConversionError::VertexCountOverflow(vertex_count));
        }

        let output_path = self.output_path;
        let io_err = |e: std::io::Error| ConversionError::io(&output_path, e);

        let mut temp = self.file.into_inner().map_err(|e| io_err(e.into_error()))?;
        temp.seek(SeekFrom::Start(VERTEX_COUNT_OFFSET)).map_err(io_err)?;
        temp.write_all(format_vertex_count(vertex_count).as_bytes())
            .map_err(io_err)?;
        temp.flush().map_err(io_err)?;
        if let Some(permissions) = destination_permissions(&output_path) {
            temp.as_file().set_permissions(permissions).map_err(io_err)?;
        }
        temp.as_file().sync_all().map_err(io_err)?;

        temp.persist(&output_path)
            .map_err(|e| ConversionError::Persist {
                path: output_path.clone(),
                source: e.error,
            })?;

        info!("vertex count {} written to {}", vertex_count, output_path.display());
        Ok(output_path)
    }
}

/// Temporary files are owner-only; an existing destination keeps its mode
/// and a new one gets the usual world-readable mode.
fn destination_permissions(output_path: &Path) -> Option<Permissions> {
    match fs::metadata(output_path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

fn format_vertex_count(count: u64) -> String {
    format!("{:0width$}", count, width = VERTEX_COUNT_WIDTH)
}

/// Rounds to the record precision, never emitting a negative zero.
pub fn format_coordinate(value: f64) -> String {
    let scale = 10f64.powi(POSITION_DECIMALS as i32);
    let mut rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{:.prec$}", rounded, prec = POSITION_DECIMALS)
}
