use std::path::Path;

use pbx_types::FileType;

use crate::traits::{FileSystem, FileTypeClassifier};

/// [`FileSystem`] backed by `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }
}

/// [`FileTypeClassifier`] keyed on the lowercase file extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionClassifier;

impl ExtensionClassifier {
    /// Type tag for an extension, if known.
    pub fn tag_for(extension: &str) -> Option<&'static str> {
        let tag = match extension {
            "swift" => "sourcecode.swift",
            "m" => "sourcecode.c.objc",
            "mm" => "sourcecode.cpp.objcpp",
            "c" => "sourcecode.c.c",
            "cc" | "cpp" | "cxx" => "sourcecode.cpp.cpp",
            "h" => "sourcecode.c.h",
            "hpp" | "hh" => "sourcecode.cpp.h",
            "metal" => "sourcecode.metal",
            "s" => "sourcecode.asm",
            "png" => "image.png",
            "jpg" | "jpeg" => "image.jpeg",
            "pdf" => "image.pdf",
            "plist" => "text.plist.xml",
            "strings" => "text.plist.strings",
            "stringsdict" => "text.plist.stringsdict",
            "json" => "text.json",
            "xcconfig" => "text.xcconfig",
            "txt" => "text",
            "md" => "net.daringfireball.markdown",
            "sh" => "text.script.sh",
            "storyboard" => "file.storyboard",
            "xib" => "file.xib",
            "xcassets" => "folder.assetcatalog",
            "xcdatamodeld" => "wrapper.xcdatamodeld",
            "framework" => "wrapper.framework",
            "xcframework" => "wrapper.xcframework",
            "bundle" => "wrapper.plug-in",
            "app" => "wrapper.application",
            "a" => "archive.ar",
            "dylib" => "compiled.mach-o.dylib",
            "tbd" => "sourcecode.text-based-dylib-definition",
            "entitlements" => "text.plist.entitlements",
            _ => return None,
        };
        Some(tag)
    }
}

impl FileTypeClassifier for ExtensionClassifier {
    fn classify(&self, path: &Path) -> FileType {
        path.extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .and_then(|extension| Self::tag_for(&extension))
            .map(FileType::from)
            .unwrap_or_else(FileType::unknown)
    }
}
