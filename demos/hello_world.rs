use anyhow::Context;
use vroot_kit::{FsBackend, RootedFS, Settings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let tmp = std::env::temp_dir().join("vroot_demo");
    std::fs::create_dir_all(&tmp)?;
    println!("Demo root: {}", tmp.display());

    // `VROOT_DEBUG=1` makes every call visible, not only failures
    let settings = Settings::from_env();
    let mut fs = RootedFS::builder().root(&tmp).settings(&settings).build()?;

    // creates `<tmp>/docs/drafts` and its parent
    fs.mkdir("/docs/drafts").context("mkdir")?;
    fs.touch("/docs/drafts/first.txt").context("touch")?;
    std::fs::write(fs.resolve("/docs/drafts/first.txt")?, b"Hello")?;

    // the destination directory `/archive` does not exist yet; cp creates it
    fs.cp("/docs/drafts/first.txt", "/archive/first.txt")?;

    // `..` cannot climb out of the root: this lands in `<root>/docs`
    fs.cd("/../../docs")?;
    println!("pwd: {}", fs.pwd());

    for entry in fs.ls("")? {
        println!("  {}", entry.path().display());
    }

    // a second mkdir of the same path is refused
    if let Err(e) = fs.mkdir("/drafts") {
        println!("expected failure ({:?}): {e}", e.kind());
    }

    fs.cd("..")?;
    println!("pwd after `cd ..`: {}", fs.pwd());

    std::fs::remove_dir_all(&tmp)?;
    Ok(())
}
