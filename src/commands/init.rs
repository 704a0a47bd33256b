//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Next.js Blog
author: Hiroe
description: ''
language: en

# Home page
intro: This is a sample website.
blog_heading: 📝 A beginner engineer's blog
profile_image: /images/profile.jpeg
favicon: /favicon.ico
index_generator:
  order_by: -date

# Directory
posts_dir: posts
public_dir: public
static_dir: static

# Server
server:
  ip: localhost
  port: 3000

# Demo API routes
api:
  users_url: https://jsonplaceholder.typicode.com/users
"#;

/// Initialize a new blog in the given directory
///
/// An existing `_config.yml` or sample post is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static/images"))?;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, CONFIG)?;
        tracing::debug!("Created {:?}", config_path);
    }

    let sample_path = target_dir.join("posts/ssg-ssr.md");
    if !sample_path.exists() {
        let today = chrono::Local::now().format("%Y-%m-%d");
        let sample_post = format!(
            r#"---
title: "When to use static generation vs. server-side rendering"
date: "{}"
thumbnail: "/images/ssg-ssr.png"
---

We recommend using **static generation** (with and without data) whenever possible,
because the page can be built once and served by a CDN.

## Static generation

- Marketing pages
- Blog posts
- Product listings

## Server-side rendering

Use it when a page shows frequently updated data that changes on every request.
"#,
            today
        );
        fs::write(&sample_path, sample_post)?;
        tracing::debug!("Created {:?}", sample_path);
    }

    Ok(())
}
