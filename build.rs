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

    for key in ["base_path", "content_dir", "static_dir", "output_dir", "template"] {
        match table.get(key) {
            Some(toml::Value::String(_)) => {}
            Some(other) => panic!(
                "default_config.toml: `{}` must be a string, found {}",
                key,
                other.type_str()
            ),
            None => panic!("default_config.toml is missing `{}`", key),
        }
    }
}
