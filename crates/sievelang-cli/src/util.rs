use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read `path`'s contents, or stdin if `path` is `-`.
pub fn read_source(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}
