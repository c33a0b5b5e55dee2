//! File reference resolution against the document root.

use std::fs;
use std::path::Path;

use proxy_login::config::load_site;

mod common;

use common::compile_in;

#[test]
fn test_template_resolves_against_root_host_file_does_not() {
    let root = tempfile::tempdir().unwrap();

    let config = compile_in(
        "loginsrv {
            template myTemplate.tpl
            redirect_host_file redirectDomains.txt
            jwt_secret s
            simple bob=secret
        }",
        Some(root.path()),
    )
    .unwrap();

    assert_eq!(
        Path::new(&config.template),
        root.path().join("myTemplate.tpl")
    );
    assert_eq!(config.redirect_host_file, "redirectDomains.txt");
}

#[test]
fn test_absolute_template_is_kept() {
    let root = tempfile::tempdir().unwrap();
    let absolute = root.path().join("elsewhere.tpl");
    let input = format!(
        "login {{\n template \"{}\"\n jwt_secret s\n simple bob=secret\n}}",
        absolute.display()
    );

    let config = compile_in(&input, Some(Path::new("/srv/www"))).unwrap();
    assert_eq!(Path::new(&config.template), absolute);
}

#[test]
fn test_site_file_root_directive() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("Sitefile");
    fs::write(
        &site,
        "root /srv/site\nlogin {\n template login.tpl\n jwt_secret s\n simple bob=secret\n}\n",
    )
    .unwrap();

    let configs = load_site(&site, None).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(
        Path::new(&configs[0].template),
        Path::new("/srv/site").join("login.tpl")
    );
}
