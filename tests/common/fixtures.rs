//! Test fixtures - engine archives and SDK layouts.

use std::io::Write;
use std::path::Path;

/// Build an in-memory zip archive from `(name, content)` pairs.
///
/// Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// windows-x64-embedder.zip
pub fn windows_embedder() -> Vec<u8> {
    zip_bytes(&[
        ("flutter_engine.dll", b"MZ\x90\x00"),
        ("flutter_engine.dll.lib", b"!<arch>\n"),
        ("flutter_embedder.h", b"#ifndef FLUTTER_EMBEDDER_H_\n"),
    ])
}

/// linux-x64-embedder
pub fn linux_embedder() -> Vec<u8> {
    zip_bytes(&[
        ("libflutter_engine.so", b"\x7fELF"),
        ("flutter_embedder.h", b"#ifndef FLUTTER_EMBEDDER_H_\n"),
    ])
}

/// FlutterEmbedder.framework.zip: a zip holding another zip.
pub fn macos_embedder() -> Vec<u8> {
    let framework = zip_bytes(&[
        ("Versions/", b""),
        ("Versions/A/", b""),
        ("Versions/A/FlutterEmbedder", b"\xcf\xfa\xed\xfe"),
        ("Versions/A/Headers/FlutterEmbedder.h", b"#pragma once\n"),
    ]);
    zip_bytes(&[("FlutterEmbedder.framework.zip", &framework)])
}

/// Create `<root>/bin/internal/engine.version` with `content`.
pub fn write_sdk(root: &Path, content: &str) {
    let internal = root.join("bin").join("internal");
    std::fs::create_dir_all(&internal).unwrap();
    std::fs::write(internal.join("engine.version"), content).unwrap();
}
