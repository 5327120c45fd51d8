use std::path::PathBuf;

/// `<prefix><counter>` with the counter zero-padded to at least three digits.
///
/// Counters of 1000 and above simply widen the field.
pub fn depth_file_name(prefix: &str, counter: usize) -> String {
    format!("{}{:03}", prefix, counter)
}

/// The depth file name with `pc_` prepended to its final path component, so
/// `out/scan_001` pairs with `out/pc_scan_001`.
pub fn point_cloud_file_name(prefix: &str, counter: usize) -> PathBuf {
    let depth_name = PathBuf::from(depth_file_name(prefix, counter));
    let file_name = depth_name
        .file_name()
        .map(|n| format!("pc_{}", n.to_string_lossy()))
        .unwrap_or_else(|| format!("pc_{:03}", counter));
    depth_name.with_file_name(file_name)
}
