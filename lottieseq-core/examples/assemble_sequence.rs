use lottieseq::{
    ArchiveEntry, DecodedImage, Fps, ImageKind, UploadOptions, UploadRequest, encode_image,
    handle_upload, write_archive,
};

/// A square with a dot that travels left to right over `frames` frames.
fn dot_frame(i: u32, frames: u32, size: u32) -> DecodedImage {
    let cx = (size - 8) * i / frames.max(1) + 4;
    let cy = size / 2;
    let img = image::RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as i64 - cx as i64;
        let dy = y as i64 - cy as i64;
        if dx * dx + dy * dy <= 9 {
            image::Rgba([255, 51, 102, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    DecodedImage::from_rgba(format!("dot_{i}.png"), img)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let frames = 24;
    let entries = (0..frames)
        .map(|i| {
            let img = dot_frame(i, frames, 64);
            let bytes = encode_image(&img, ImageKind::Png)?;
            Ok(ArchiveEntry::file(img.name(), bytes))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let archive = write_archive(&entries)?;

    let resp = handle_upload(
        &UploadRequest::new(archive, Fps::default().get().to_string()),
        &UploadOptions::default(),
    );
    let Some(doc) = resp.lottie() else {
        anyhow::bail!("conversion failed: {}", resp.to_json_string()?);
    };

    let out_dir = std::path::Path::new("target");
    std::fs::create_dir_all(out_dir)?;
    let out = out_dir.join(lottieseq::ANIMATION_FILE_NAME);
    std::fs::write(&out, doc.to_json_string(true)?)?;

    let summary = doc.summary();
    println!(
        "wrote {} ({} frames, {:.2}s, {}x{})",
        out.display(),
        summary.frame_count,
        summary.duration_secs,
        summary.width,
        summary.height
    );
    Ok(())
}
