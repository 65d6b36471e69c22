use cybind_ast::arena::AstStore;

pub(crate) fn get_test_data_path() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());
    manifest_dir.join("test_data").join("ast")
}

pub(crate) fn load_fixture(name: &str) -> AstStore {
    let path = get_test_data_path().join(name);
    cybind::load(&path)
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"))
}
