use std::process::Command;

fn main() {
  embed_git_hash();
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Exposes the short commit hash as `GIT_HASH` for the startup debug line.
/// Nothing is emitted outside a git checkout.
fn embed_git_hash() {
  let Ok(output) = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output() else {
    return;
  };
  if !output.status.success() {
    return;
  }

  let git_hash = String::from_utf8(output.stdout).unwrap_or_default().trim().to_string();
  if !git_hash.is_empty() {
    println!("cargo:rustc-env=GIT_HASH={git_hash}");
  }
}
