use crate::{InitArgs, theme};

const STARTER_CONFIG: &str = "\
site:
  title: My Garden
  description: Notes and essays
  # url: https://garden.example.com
  # og_image: /og.png

# nav:
#   - { text: Home, link: / }
#   - { text: Notes, link: /notes/ }

# Sidebar is generated from the content directory when omitted.
# sidebar:
#   - index.md
#   - section: Notes
#     items:
#       - notes/welcome.md

# edit_link:
#   pattern: https://github.com/me/garden/edit/main/:path

# og_images:
#   enable: true
";

const STARTER_INDEX: &str = "\
---
title: Home
---

# Welcome

This is your garden. Plant notes under `content/` and link them together
with [[wiki links]].
";

const STARTER_NOTE: &str = "\
---
title: Wiki Links
tags:
  - meta
---

# Wiki Links

Link to any note by its title or filename: [[Home]].
";

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join("notegarden.yaml");
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {}",
            config_file.display()
        ));
    }

    println!("Initializing garden in {}", path.display());

    tokio::fs::write(&config_file, STARTER_CONFIG).await?;
    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let content_dir = path.join("content");
    tokio::fs::create_dir_all(content_dir.join("notes")).await?;
    tokio::fs::write(content_dir.join("index.md"), STARTER_INDEX).await?;
    tokio::fs::write(content_dir.join("notes/wiki-links.md"), STARTER_NOTE).await?;
    println!("Created starter content in {}", content_dir.display());

    let theme_path = theme::theme_dir(&path, "default");
    theme::write_default_theme(&theme_path)?;
    println!("Created default theme in {}", theme_path.display());

    println!("\nNext steps:\n  cd {}\n  notegarden serve", args.path.display());

    Ok(())
}
