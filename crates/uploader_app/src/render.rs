use std::io::{self, Write};

use uploader_core::{AppViewModel, UploadOutcome};

pub fn render(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    if view.files.is_empty() {
        writeln!(out, "  (no files staged)")?;
    }
    for row in &view.files {
        let marker = if row.uploading { "  (uploading)" } else { "" };
        writeln!(
            out,
            "  #{:<4} {}  {}  {}{}",
            row.id,
            row.name,
            row.size_label(),
            row.mime_type,
            marker
        )?;
    }
    let disabled = if view.can_upload { "" } else { " (disabled)" };
    writeln!(out, "  [{}]{}", view.upload_label(), disabled)?;
    match &view.last_outcome {
        Some(UploadOutcome::Succeeded { payload }) => writeln!(out, "  Last upload: ok {payload}")?,
        Some(UploadOutcome::Failed { message }) => writeln!(out, "  Last upload failed: {message}")?,
        None => {}
    }
    out.flush()
}
