use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn rubrica() -> Command {
    cargo_bin_cmd!("rubrica")
}

/// Initialize a store inside a temp dir and return its path
#[allow(dead_code)]
pub fn init_store(dir: &Path) -> PathBuf {
    let store = dir.join(".rubrica");
    rubrica()
        .arg("--store")
        .arg(&store)
        .arg("init")
        .assert()
        .success();
    store
}

/// A complete two-criterion rubric in the text interchange format
#[allow(dead_code)]
pub const SAMPLE_RUBRIC_TEXT: &str = "\
=== RUBRICA ===
NOMBRE: Rúbrica Grupal E1 - Programación Móvil
TIPO: Grupal
ENTREGA: E1
CURSOS: EPM
PUNTUACION_TOTAL: 100
=== CRITERIOS ===
CRITERIO_1: Diseño | 40
NIVEL_1: 0-20 | Insuficiente | No cumple el diseño acordado
NIVEL_2: 21-40 | Logrado | Cumple el diseño acordado
CRITERIO_2: Funcionalidad | 60
NIVEL_1: 0-30 | Insuficiente | Funciones incompletas
NIVEL_2: 31-60 | Logrado | Funciones completas
=== ESCALA ===
ESCALA_1: 0-59 | Insuficiente
ESCALA_2: 60-100 | Aprobado
===FIN===
";

/// Write the sample rubric to `dir` and return the file path
#[allow(dead_code)]
pub fn write_sample_rubric(dir: &Path) -> PathBuf {
    let path = dir.join("rubrica.txt");
    fs::write(&path, SAMPLE_RUBRIC_TEXT).unwrap();
    path
}

/// Import a rubric file and return (id, code) from the JSON report
#[allow(dead_code)]
pub fn import_rubric(store: &Path, file: &Path) -> (String, String) {
    let output = rubrica()
        .arg("--store")
        .arg(store)
        .args(["--format", "json", "import"])
        .arg(file)
        .output()
        .unwrap();
    assert!(output.status.success(), "import failed: {:?}", output);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    (
        report["id"].as_str().unwrap().to_string(),
        report["codigo"].as_str().unwrap().to_string(),
    )
}
