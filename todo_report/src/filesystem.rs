use anyhow::{Context, Result};
use std::path::Path;
use tokio::{
    fs::{self, create_dir_all, File},
    io::{AsyncWriteExt, BufWriter},
};

/// Read a file as UTF-8, replacing invalid sequences.
#[inline]
pub async fn read_lossy(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("failed to open file for reading: {path:?}"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Replace the contents of a file, creating parent directories as needed.
#[inline]
pub async fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = create_file(path).await?;
    file.write_all(contents.as_bytes())
        .await
        .with_context(|| format!("failed to write file: {path:?}"))?;
    file.flush()
        .await
        .with_context(|| format!("failed to flush file: {path:?}"))?;
    Ok(())
}

#[inline]
pub async fn create_file(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    if let Some(directory) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        create_dirs(directory).await?;
    }
    Ok(BufWriter::new(File::create(path).await.with_context(
        || format!("failed to create file for writing: {path:?}"),
    )?))
}

#[inline]
pub async fn create_dirs(directory: impl AsRef<Path>) -> Result<()> {
    let directory = directory.as_ref();
    if !directory.exists() {
        create_dir_all(directory)
            .await
            .with_context(|| format!("failed to create directory {directory:?}"))?;
    }
    Ok(())
}
