use std::{env, fs, path::Path};

// Place config.json next to the built binaries so `AppConfig::locate`
// finds it when running from target/.
fn main() {
    println!("cargo:rerun-if-changed=config.json");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };

    // OUT_DIR = target/<profile>/build/<crate>-<hash>/out
    let Some(profile_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        println!("cargo:warning=could not derive target directory from {out_dir}");
        return;
    };

    let dst = profile_dir.join("config.json");
    if let Err(e) = fs::copy("config.json", &dst) {
        println!("cargo:warning=could not copy config.json to {}: {e}", dst.display());
    }
}
