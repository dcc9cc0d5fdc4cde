use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BASE: &str = r#"<html><head><link href="/css/{{ css_bundle }}"></head>
<body>{% block content %}{% endblock content %}<script src="/js/{{ js_bundle }}"></script></body></html>
"#;

const INDEX: &str = r#"{% extends "base.html" %}{% block content %}
<h1>{{ title | default(value="Home") }}</h1>
{% if tenant %}<p class="tenant">{{ tenant.name }}</p>{% endif %}
{% if user %}<p class="user">{{ user.name }} &lt;{{ email }}&gt;</p>{% endif %}
{% if banner %}<p class="banner">{{ banner }}</p>{% endif %}
{% endblock content %}"#;

fn write_app(root: &Path) {
    let views = root.join("views");
    fs::create_dir_all(&views).expect("mkdir views");
    fs::write(views.join("base.html"), BASE).expect("write base");
    fs::write(views.join("index.html"), INDEX).expect("write index");
    for page in ["403.html", "404.html", "500.html"] {
        fs::write(
            views.join(page),
            r#"{% extends "base.html" %}{% block content %}error{% endblock content %}"#,
        )
        .expect("write page");
    }
    fs::create_dir_all(root.join("dist/js")).expect("mkdir js");
    fs::create_dir_all(root.join("dist/css")).expect("mkdir css");
    fs::write(root.join("dist/js/app.a1b2.js"), "").expect("write js");
    fs::write(root.join("dist/css/app.a1b2.css"), "").expect("write css");
}

fn atrium_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("atrium"));
    cmd.env_remove("ATRIUM_ENV")
        .env_remove("ATRIUM_ROOT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--root")
        .arg(root);
    cmd
}

#[test]
fn check_reports_bundles_and_templates() {
    let app = TempDir::new().expect("app");
    write_app(app.path());

    atrium_cmd(app.path())
        .arg("check")
        .assert()
        .success()
        .stdout(contains("✓ renderer ready (production)"))
        .stdout(contains("    · index.html"))
        .stdout(contains("app.a1b2.js"))
        .stdout(contains("app.a1b2.css"))
        .stdout(contains("index.html"))
        .stdout(contains("500.html"));
}

#[test]
fn check_fails_without_css_bundle() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    fs::remove_file(app.path().join("dist/css/app.a1b2.css")).expect("rm css");

    atrium_cmd(app.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(contains("CSS bundle not found"));
}

#[test]
fn render_anonymous_page_with_data_file() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    let data = app.path().join("data.json");
    fs::write(&data, r#"{"title":"Hi"}"#).expect("write data");

    atrium_cmd(app.path())
        .args(["render", "index.html", "--data"])
        .arg(&data)
        .args(["--tenant", "demo", "--tenant-name", "Demo Co"])
        .assert()
        .success()
        .stdout(contains("<h1>Hi</h1>"))
        .stdout(contains("app.a1b2.js"))
        .stdout(contains("app.a1b2.css"))
        .stdout(contains(r#"<p class="tenant">Demo Co</p>"#))
        .stdout(contains(r#"class="user""#).not());
}

#[test]
fn render_signed_in_user_and_vars() {
    let app = TempDir::new().expect("app");
    write_app(app.path());

    atrium_cmd(app.path())
        .args([
            "render",
            "index.html",
            "--user-email",
            "arya@example.com",
            "--var",
            "banner=Maintenance tonight",
        ])
        .assert()
        .success()
        .stdout(contains("arya &lt;arya@example.com&gt;"))
        .stdout(contains(r#"<p class="banner">Maintenance tonight</p>"#));
}

#[test]
fn render_unknown_template_fails_with_empty_stdout() {
    let app = TempDir::new().expect("app");
    write_app(app.path());

    atrium_cmd(app.path())
        .args(["render", "signup.html"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("the template 'signup.html' does not exist"));
}

#[test]
fn render_rejects_non_object_data() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    let data = app.path().join("data.json");
    fs::write(&data, "[1, 2, 3]").expect("write data");

    atrium_cmd(app.path())
        .args(["render", "index.html", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(contains("must contain a JSON object"));
}

#[test]
fn render_to_output_file() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    let out = app.path().join("out.html");

    atrium_cmd(app.path())
        .args(["render", "404.html", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&out).expect("read output");
    assert!(html.contains("error"));
    assert!(html.contains("app.a1b2.js"));
}

#[test]
fn failed_render_keeps_existing_output_file() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    let out = app.path().join("out.html");
    fs::write(&out, "previous build").expect("seed output");

    atrium_cmd(app.path())
        .args(["render", "signup.html", "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(contains("the template 'signup.html' does not exist"));

    assert_eq!(fs::read_to_string(&out).expect("read output"), "previous build");
}

#[test]
fn config_file_sets_mode_and_template_list() {
    let app = TempDir::new().expect("app");
    write_app(app.path());
    let config = app.path().join("atrium.yaml");
    fs::write(&config, "environment: development\ntemplates: [index.html]\n").expect("write config");

    atrium_cmd(app.path())
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(contains("renderer ready (development)"))
        .stdout(contains("404.html").not());
}
