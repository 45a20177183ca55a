#[cfg(not(target_os = "android"))]
fn main() -> anyhow::Result<()> {
    vrcubeworld::desktop_main()
}

// the device build enters through `android_main` in the library
#[cfg(target_os = "android")]
fn main() {}
