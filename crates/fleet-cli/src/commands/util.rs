use anyhow::{bail, Context, Result};
use rayon::ThreadPoolBuilder;
use std::fs;
use std::path::Path;

/// Size the global rayon pool from `auto` or a positive count.
pub fn configure_threads(spec: &str) -> Result<usize> {
    let count = thread_count(spec)?;
    // A pool already built (e.g. by an earlier call) is kept.
    let _ = ThreadPoolBuilder::new().num_threads(count).build_global();
    Ok(count)
}

fn thread_count(spec: &str) -> Result<usize> {
    if spec.eq_ignore_ascii_case("auto") {
        return Ok(num_cpus::get());
    }
    match spec.parse::<usize>() {
        Ok(0) | Err(_) => bail!("--threads expects 'auto' or a positive number, got '{spec}'"),
        Ok(count) => Ok(count),
    }
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if parent != Path::new("") {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
