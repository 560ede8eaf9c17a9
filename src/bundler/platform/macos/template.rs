//! Info.plist template.

/// Handlebars template for `Contents/Info.plist`.
///
/// Scalar values are XML-escaped; `custom` is inserted raw.
pub const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleDevelopmentRegion</key>
    <string>en-us</string>
    <key>CFBundleTypeIconFile</key>
    <string>docplaintext</string>
    <key>CFBundleTypeName</key>
    <string>Plain Text</string>
    <key>CFBundleExecutable</key>
    <string>{{executable}}</string>
    <key>CFBundleIconFile</key>
    <string>{{icon_file}}</string>
    <key>CFBundleIdentifier</key>
    <string>{{identifier}}</string>
    <key>CFBundleInfoDictionaryVersion</key>
    <string>6.0</string>
    <key>CFBundleName</key>
    <string>{{name}}</string>
    <key>CFBundlePackageType</key>
    <string>AAPL</string>
    <key>CFBundleShortVersionString</key>
    <string>{{version}}</string>
    <key>CFBundleVersion</key>
    <string>{{version}}</string>
{{{custom}}}
</dict>
</plist>"#;
