fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use a bundled protoc so the build does not depend on a system install
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    // Generate gRPC code from proto files
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile(&["../proto/user.proto"], &["../proto"])?;

    println!("cargo:rerun-if-changed=../proto/user.proto");

    Ok(())
}
