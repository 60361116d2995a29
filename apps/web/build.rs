use std::{env, process::Command};

fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=USERS_ADMIN_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=USERS_ADMIN_API_KEY");
    println!("cargo:rerun-if-env-changed=USERS_ADMIN_LOG_LEVEL");

    let sha = git_short_sha().unwrap_or_else(|| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=USERS_ADMIN_GIT_SHA={sha}");
    println!("cargo:rustc-env=USERS_ADMIN_BUILD_PROFILE={profile}");
}
