use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for key in ["content_dir", "template", "static_dir", "output_dir", "base_path", "log_level"] {
        if !table.get(key).is_some_and(toml::Value::is_str) {
            panic!("default_config.toml: `{}` must be a string", key);
        }
    }
}
