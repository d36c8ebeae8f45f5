use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::generator::error::ReportError;
use crate::types::report::Section;

/// 按规划顺序重组所有章节并转义 `$`，得到最终报告
pub fn compile_final_report(
    sections: &[Section],
    completed: &[Section],
) -> Result<String, ReportError> {
    let contents: HashMap<&str, &str> = completed
        .iter()
        .map(|s| (s.name.as_str(), s.content.as_str()))
        .collect();

    let ordered = sections
        .iter()
        .map(|planned| {
            contents
                .get(planned.name.as_str())
                .copied()
                .ok_or_else(|| ReportError::MissingSection(planned.name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(escape_dollar_signs(&ordered.join("\n\n")))
}

/// 把未转义的 `$` 转义为 `\$`，已转义的保持不变。对自身输出幂等。
pub fn escape_dollar_signs(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if c == '$' && prev != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        prev = Some(c);
    }
    escaped
}

/// 保存最终报告
pub async fn save(config: &Config, report: &str) -> Result<PathBuf> {
    let outlet = DiskOutlet::new(config.output_path.clone(), config.render_html);
    outlet.save(report).await?;
    Ok(config.output_path.clone())
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, report: &str) -> Result<()>;
}

/// 写入本地磁盘的输出端，可选同时渲染一份HTML
pub struct DiskOutlet {
    output_path: PathBuf,
    render_html: bool,
}

impl DiskOutlet {
    pub fn new(output_path: PathBuf, render_html: bool) -> Self {
        Self {
            output_path,
            render_html,
        }
    }

    pub fn html_path(&self) -> PathBuf {
        self.output_path.with_extension("html")
    }

    fn write_file(path: &Path, content: &str) -> Result<()> {
        // 确保父目录存在
        if let Some(parent_dir) = path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)
                    .with_context(|| format!("无法创建目录: {}", parent_dir.display()))?;
            }
        }
        fs::write(path, content).with_context(|| format!("无法写入文件: {}", path.display()))
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, report: &str) -> Result<()> {
        info!("🖊️ 报告存储中...");

        Self::write_file(&self.output_path, report)?;
        info!("💾 已保存报告: {}", self.output_path.display());

        if self.render_html {
            let html_path = self.html_path();
            Self::write_file(&html_path, &markdown::to_html(report))?;
            info!("💾 已保存HTML: {}", html_path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn done(name: &str, content: &str) -> Section {
        Section::new(name, "desc", false).with_content(content)
    }

    #[test]
    fn test_compile_keeps_plan_order() {
        let plan = vec![
            Section::new("Intro", "d", false),
            Section::new("Body", "d", true),
            Section::new("End", "d", false),
        ];
        let completed = vec![done("End", "C"), done("Intro", "A"), done("Body", "B")];

        let report = compile_final_report(&plan, &completed).unwrap();
        assert_eq!(report, "A\n\nB\n\nC");
    }

    #[test]
    fn test_compile_missing_section_fails() {
        let plan = vec![Section::new("Intro", "d", false), Section::new("Body", "d", true)];
        let completed = vec![done("Intro", "A")];

        let err = compile_final_report(&plan, &completed).unwrap_err();
        assert_eq!(err, ReportError::MissingSection("Body".to_string()));
    }

    #[test]
    fn test_compile_applies_escaping() {
        let plan = vec![Section::new("Price", "d", true)];
        let completed = vec![done("Price", "costs $5")];

        assert_eq!(compile_final_report(&plan, &completed).unwrap(), "costs \\$5");
    }

    #[test]
    fn test_escape_dollar_signs() {
        assert_eq!(
            escape_dollar_signs("Cost is $5 and \\$10"),
            "Cost is \\$5 and \\$10"
        );
        assert_eq!(escape_dollar_signs("$$"), "\\$\\$");
        assert_eq!(escape_dollar_signs("no markers"), "no markers");
        assert_eq!(escape_dollar_signs(""), "");
    }

    #[test]
    fn test_escape_is_idempotent() {
        for input in ["Cost is $5 and \\$10", "$$x$", "\\\\$a", "价格 $3"] {
            let once = escape_dollar_signs(input);
            assert_eq!(escape_dollar_signs(&once), once);
        }
    }

    #[tokio::test]
    async fn test_disk_outlet_writes_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/report.md");

        let outlet = DiskOutlet::new(path.clone(), false);
        outlet.save("# Title\n\nBody").await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# Title\n\nBody");
        assert!(!outlet.html_path().exists());
    }

    #[tokio::test]
    async fn test_disk_outlet_renders_html() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.md");

        let outlet = DiskOutlet::new(path.clone(), true);
        outlet.save("# Title").await.unwrap();

        let html = fs::read_to_string(temp_dir.path().join("report.html")).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[tokio::test]
    async fn test_save_uses_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            output_path: temp_dir.path().join("out.md"),
            ..Config::default()
        };

        let saved = save(&config, "report").await.unwrap();

        assert_eq!(saved, config.output_path);
        assert_eq!(fs::read_to_string(&saved).unwrap(), "report");
    }
}
