//! Integration tests for `asset-digest build`

use anyhow::Result;

use crate::common::{HELLO_SHA256, TestProject};

#[test]
fn test_build_default_destination() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("css/site.css", "hello")?;
    project.write_file("_includes/head.html", "{{ unclosed")?;
    project.write_file(".hidden", "x")?;
    project.write_file(
        "index.html",
        "<link href=\"{{ '/css/site.css' | asset_digest }}\">",
    )?;
    project.write_file("blog/post.html", "---\ntitle: Post\n---\n{{ page.title }} at {{ page.path }}")?;

    let output = project.run(&["build"])?;
    output
        .assert_success()
        .assert_stdout_contains("2 rendered, 1 copied, 1 skipped");

    assert_eq!(
        project.read_file("_site/index.html")?,
        format!("<link href=\"/css/site.css?v={HELLO_SHA256}\">")
    );
    assert!(project.read_file("_site/blog/post.html")?.contains("Post at blog/post.html"));
    assert_eq!(project.read_file("_site/css/site.css")?, "hello");
    assert!(!project.path().join("_site/_includes").exists());
    assert!(!project.path().join("_site/.hidden").exists());
    Ok(())
}

#[test]
fn test_build_with_config_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(
        r#"
source = "site"
destination = "public"

[digest]
algorithm = "md5"
param = "rev"
length = 8

[templates]
extensions = ["html", "xml"]
exclude = ["drafts/**"]
"#,
    )?;
    project.write_file("site/app.js", "hello")?;
    project.write_file("site/index.html", "{{ '/app.js' | asset_digest }}")?;
    project.write_file("site/feed.xml", "<link>{{ 'app.js' | asset_digest }}</link>")?;
    project.write_file("site/drafts/wip.html", "{{ broken")?;

    let output = project.run(&["build"])?;
    output
        .assert_success()
        .assert_stdout_contains("2 rendered, 1 copied, 1 skipped");

    assert_eq!(project.read_file("public/index.html")?, "/app.js?rev=5d41402a");
    assert_eq!(project.read_file("public/feed.xml")?, "<link>app.js?rev=5d41402a</link>");
    assert!(!project.path().join("public/drafts").exists());
    assert!(!project.path().join("public/asset-digest.toml").exists());
    Ok(())
}

#[test]
fn test_build_destination_flag_and_quiet() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("index.html", "plain")?;

    let output = project.run(&["--quiet", "build", "--destination", "dist"])?;
    output.assert_success();
    assert!(output.stdout.is_empty());
    assert_eq!(project.read_file("dist/index.html")?, "plain");
    Ok(())
}

#[test]
fn test_build_stops_on_render_error() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("index.html", "{% if %}")?;

    let output = project.run(&["build"])?;
    output.assert_failure().assert_stderr_contains("Failed to render");
    Ok(())
}

#[test]
fn test_build_refuses_source_as_destination() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("style.css", "hello")?;
    project.write_file("index.html", "{{ 'style.css' | asset_digest }}")?;

    let output = project.run(&["build", "--destination", "."])?;
    output
        .assert_failure()
        .assert_stderr_contains("Invalid configuration value for 'destination'");

    assert_eq!(project.read_file("style.css")?, "hello");
    assert_eq!(project.read_file("index.html")?, "{{ 'style.css' | asset_digest }}");
    Ok(())
}
