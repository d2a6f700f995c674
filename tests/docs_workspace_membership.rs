use std::fs;

fn workspace_members(cargo: &str) -> Vec<String> {
    let start = cargo.find("members = [").expect("workspace members list");
    let end = start + cargo[start..].find(']').expect("closing bracket");
    cargo[start..end]
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| line.starts_with('"'))
        .map(|line| line.trim_end_matches(',').trim_matches('"').to_string())
        .collect()
}

#[test]
fn every_workspace_member_has_a_manifest() {
    let root = env!("CARGO_MANIFEST_DIR");
    let cargo = fs::read_to_string(format!("{root}/Cargo.toml")).expect("Failed to read Cargo.toml");
    let members = workspace_members(&cargo);
    assert_eq!(members.len(), 3, "unexpected members: {members:?}");

    for member in &members {
        let manifest = format!("{root}/{member}/Cargo.toml");
        assert!(
            fs::metadata(&manifest).is_ok(),
            "{member} is a workspace member but has no Cargo.toml"
        );
    }
}

#[test]
fn readme_lists_every_workspace_member() {
    let root = env!("CARGO_MANIFEST_DIR");
    let cargo = fs::read_to_string(format!("{root}/Cargo.toml")).expect("Failed to read Cargo.toml");
    let readme = fs::read_to_string(format!("{root}/README.md")).expect("Failed to read README.md");

    for member in workspace_members(&cargo) {
        assert!(
            readme.contains(&format!("`{member}`")),
            "README.md must describe workspace member {member}"
        );
    }
}
