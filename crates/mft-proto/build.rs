use anyhow::Result;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=proto/StorageCommon.proto");
    println!("cargo:rerun-if-changed=proto/MFTTransferApi.proto");

    // Servers are generated too so tests can stand up in-process backends.
    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(
            &["proto/StorageCommon.proto", "proto/MFTTransferApi.proto"],
            &["proto"],
        )?;

    Ok(())
}
