use std::path::PathBuf;

/// Format created file paths for display
pub fn format_created(files: &[PathBuf], json: bool) -> String {
    if json {
        let paths: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        return serde_json::to_string_pretty(&serde_json::json!({ "created": paths }))
            .unwrap_or_else(|_| "{}".to_string());
    }

    let mut output = String::new();
    for file in files {
        output.push_str(&format!("✓ {}\n", file.display()));
    }
    output.trim_end().to_string()
}
