use std::process::Command;
use vergen::EmitBuilder;

fn main() {
    let in_git_checkout = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    // The version endpoint reads VERGEN_GIT_SHA through option_env!, so a
    // tarball build without git metadata still compiles.
    let result = if in_git_checkout {
        EmitBuilder::builder()
            .build_timestamp()
            .git_sha(true)
            .emit()
    } else {
        EmitBuilder::builder().build_timestamp().emit()
    };

    if let Err(e) = result {
        println!("cargo:warning=unable to generate build metadata: {e}");
    }
}
