//! Standalone preview page.
//!
//! Wraps the publishing fragment in a complete HTML document for checking
//! the result in a browser before pasting it into WordPress. The page shows
//! a file-info summary, fixed usage instructions and the fragment itself
//! inside a `.code-block` that selects its whole text on click.
//!
//! Record scalars are escaped by maud. The fragment is inserted unescaped so
//! the browser renders it the way the publishing theme will.

use crate::naming::ArtifactNames;
use crate::record::Record;
use crate::render::render_fragment;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/preview.css");
const JS: &str = include_str!("../static/preview.js");

/// Render the full preview document for a record.
pub fn render_preview_document(record: &Record) -> String {
    let fragment = render_fragment(record);
    let names = ArtifactNames::for_title(&record.title);
    let page_title = format!("{} - WordPress预览", record.title);

    let content = html! {
        div.preview-box {
            h2 { "WordPress内容生成器" }
            (file_info(record, &names.fragment))
            (instructions())
            h3 { "生成的内容：" }
            div.code-block {
                "\n" (PreEscaped(fragment))
            }
            div.tips {
                small {
                    strong { "提示：" }
                    " 点击上方代码框可全选内容，然后按 Ctrl+C 复制。"
                    "如果您的主题不支持短代码，可能需要手动替换为相应的HTML代码。"
                }
            }
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&page_title, content).into_string()
}

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-CN" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn file_info(record: &Record, fragment_file: &str) -> Markup {
    html! {
        div.file-info {
            strong { "文件信息：" } br;
            "软件标题: " (record.title) br;
            "软件名称: " (record.name) br;
            "软件版本: " (record.version) br;
            "生成文件: " (fragment_file)
        }
    }
}

fn instructions() -> Markup {
    html! {
        div.instructions {
            strong { "使用说明：" }
            ol {
                li { "复制下方代码框中的所有内容" }
                li { "在WordPress编辑器中切换到" strong { "文本模式" } }
                li { "粘贴内容并发布" }
                li { "确保您的WordPress主题支持 [insertimg] 和 [downloads] 短代码" }
            }
        }
    }
}
