//! Integration tests for `asset-digest render`

use anyhow::Result;

use crate::common::{HELLO_SHA256, TestProject};

#[test]
fn test_render_to_stdout() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("css/site.css", "hello")?;
    project.write_file(
        "index.html",
        r#"---
title: Home
---
<title>{{ page.title }}</title>
<link rel="stylesheet" href="{{ '/css/site.css' | asset_digest }}">
<script src="{{ '/js/missing.js' | asset_digest }}"></script>
"#,
    )?;

    let output = project.run(&["render", "index.html"])?;
    output
        .assert_success()
        .assert_stdout_contains("<title>Home</title>")
        .assert_stdout_contains(&format!("href=\"/css/site.css?v={HELLO_SHA256}\""))
        .assert_stdout_contains("src=\"/js/missing.js\"");
    assert!(!output.stdout.contains("title: Home"));
    Ok(())
}

#[test]
fn test_render_to_output_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("img/logo.png", "hello")?;
    project.write_file("page.html", "{{ 'img/logo.png' | asset_digest }}")?;

    let output = project.run(&["render", "page.html", "--output", "out/page.html"])?;
    output.assert_success();
    assert!(output.stdout.is_empty());

    assert_eq!(project.read_file("out/page.html")?, format!("img/logo.png?v={HELLO_SHA256}"));
    Ok(())
}

#[test]
fn test_render_reflects_content_changes() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("app.js", "hello")?;
    project.write_file("page.html", "{{ '/app.js' | asset_digest }}")?;

    let first = project.run(&["render", "page.html"])?;
    first.assert_success();

    project.write_file("app.js", "hello, again")?;
    let second = project.run(&["render", "page.html"])?;
    second.assert_success();

    assert_ne!(first.stdout, second.stdout);
    assert!(second.stdout.starts_with("/app.js?v="));
    Ok(())
}

#[test]
fn test_render_unknown_filter_suggests_asset_digest() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("page.html", "<p>\n{{ '/app.js' | asset_digst }}\n</p>\n")?;

    let output = project.run(&["render", "page.html"])?;
    output
        .assert_failure()
        .assert_stderr_contains("Failed to render")
        .assert_stderr_contains("asset_digst")
        .assert_stderr_contains("Did you mean one of these?")
        .assert_stderr_contains("asset_digest");
    Ok(())
}

#[test]
fn test_render_non_string_argument_fails() -> Result<()> {
    let project = TestProject::new()?;
    project.write_file("page.html", "{{ 42 | asset_digest }}")?;

    let output = project.run(&["render", "page.html"])?;
    output.assert_failure().assert_stderr_contains("Failed to render");
    Ok(())
}

#[test]
fn test_render_missing_template() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run(&["render", "nope.html"])?;
    output.assert_failure().assert_stderr_contains("Template not found");
    Ok(())
}
