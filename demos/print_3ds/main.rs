use max3ds::{ImageTextures, ModelReader, ReadOptions};
use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

fn do_it(model_path: &Path, output_dir: &Path) -> Result<(), io::Error> {
    println!("{}", model_path.display());

    let mut textures = ImageTextures::new();
    let scene = match ModelReader::new(ReadOptions::default()).read_path(model_path, &mut textures)
    {
        Ok(scene) => scene,
        Err(e) => {
            println!("failed: {}", e);
            return Ok(());
        }
    };

    let file_name = model_path.file_name().unwrap_or_default().to_string_lossy();
    let output_path = output_dir.join(format!("output_{}.txt", file_name));
    let mut buffer = BufWriter::new(File::create(output_path)?);

    write!(buffer, "{}", scene)?;
    for handle in scene.texture_handles() {
        if let Some(image) = textures.get(handle) {
            writeln!(buffer, "@{}: {:?}", handle, image)?;
        }
    }
    buffer.flush()?;

    println!("done: {} ({} textures)", file_name, textures.len());

    Ok(())
}

pub fn main() -> Result<(), io::Error> {
    env_logger::init();

    let base_path = PathBuf::from(
        env::var_os("CARGO_MANIFEST_DIR").expect("could not find cargo manifest dir"),
    );
    let models = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| base_path.join("tests/fixtures"));
    let output_dir = base_path.join("target/print_3ds");
    std::fs::create_dir_all(&output_dir)?;

    for entry in WalkDir::new(models) {
        let entry = entry?;
        let is_model = entry
            .path()
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("3ds"));

        if entry.path().is_file() && is_model {
            do_it(entry.path(), &output_dir)?;
        }
    }

    Ok(())
}
