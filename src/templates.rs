//! HTML templates for the three views.
//!
//! Rendering is plain string assembly. Everything user-derived (keyword
//! echo, file names, tags) goes through [`html_escape`]; backend-owned
//! fields (highlighted titles, snippets, document bodies) go through
//! [`trusted_html`] and nothing else.

use crate::models::{DocumentDetail, ResultItem};
use crate::viewstate::{SearchType, ViewState};

/// Render a backend-supplied HTML fragment verbatim.
///
/// This is the only place raw backend HTML enters a page. The backend
/// contract is that `title`, `abstract_snippet` and the document-detail
/// fields are sanitized server-side (the highlighter emits `<em>` marks);
/// swapping this for a sanitizing renderer changes the whole client's
/// behavior without touching any view.
fn trusted_html(fragment: &str) -> &str {
    fragment
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - 司法搜索引擎</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <main class="container">
{}
    </main>
</body>
</html>"#,
        html_escape(title),
        content
    )
}

/// The home page: keyword form and similar-case upload form.
pub fn home_page(error: Option<&str>) -> String {
    let error_section = error
        .map(|msg| format!(r#"<p class="alert">{}</p>"#, html_escape(msg)))
        .unwrap_or_default();

    let content = format!(
        r#"<h1 class="title">司法搜索引擎</h1>
{error_section}
<form class="search-bar" method="post" action="/search">
    <input type="text" name="q" class="search-input" placeholder="请输入关键词" autofocus>
    <button type="submit" class="search-button">搜索</button>
</form>

<div class="divider"><span>或</span></div>

<form class="upload-section" method="post" action="/upload" enctype="multipart/form-data">
    <h2 class="upload-title">通过案例文件查找相似案例</h2>
    <input type="file" name="file" accept=".json" class="file-input"
           onchange="document.getElementById('upload-btn').disabled = this.files.length === 0;
                     document.getElementById('selected-file').textContent =
                         this.files.length ? '已选择文件: ' + this.files[0].name : '';">
    <button id="upload-btn" type="submit" class="upload-button" disabled>上传并查找相似案例</button>
    <p id="selected-file" class="selected-file-info"></p>
</form>"#,
    );

    base_template("首页", &content)
}

/// The results page, rendered from the reconciled view state.
pub fn results_page(view: &ViewState) -> String {
    let search_info = match view.search_type {
        SearchType::Keyword => {
            let text = view
                .query
                .as_ref()
                .map(|q| q.text.as_str())
                .unwrap_or_default();
            format!(
                r#"<p class="search-info">关键词：<strong>{}</strong></p>"#,
                html_escape(text)
            )
        }
        SearchType::UploadFile => format!(
            r#"<p class="search-info">通过文件 <strong>{}</strong> 查找相似案例</p>"#,
            html_escape(view.uploaded_file_name.as_deref().unwrap_or_default())
        ),
        SearchType::None => {
            r#"<p class="search-info">请在首页输入关键词或上传文件进行搜索。</p>"#.to_string()
        }
    };

    let body = if view.loading {
        r#"<p class="loading-message">加载中...</p>"#.to_string()
    } else {
        let count_line = if view.total > 0 {
            format!(
                r#"<p class="total-results-info">共找到 {} 条结果：</p>"#,
                view.total
            )
        } else if view.search_type != SearchType::None {
            r#"<p class="no-results-message">没有找到相关结果。</p>"#.to_string()
        } else {
            String::new()
        };

        let cards: String = view.results.iter().map(result_card).collect();
        let grid = if cards.is_empty() {
            String::new()
        } else {
            format!(r#"<div class="results-grid">{cards}</div>"#)
        };

        format!(
            r#"<div class="results-list-section">{count_line}{grid}{}</div>"#,
            pagination(view)
        )
    };

    let content = format!(
        r#"<h1 class="title">搜索结果</h1>
{search_info}
{body}
<a href="/" class="search-button back-home">返回首页</a>"#,
    );

    base_template("搜索结果", &content)
}

fn result_card(item: &ResultItem) -> String {
    let tags: String = item
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
        .collect::<Vec<_>>()
        .join("");
    let tags_section = if tags.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="result-tags">{tags}</div>"#)
    };

    format!(
        r#"<div class="result-card">
    <h3 class="result-title"><a href="/detail/{}">{}</a></h3>
    <div class="snippet">{}</div>
    {}
</div>"#,
        urlencoding::encode(&item.doc_id),
        trusted_html(&item.title),
        trusted_html(&item.abstract_snippet),
        tags_section
    )
}

/// Pagination controls. Only keyword searches are paginated; a single page
/// gets no controls at all.
fn pagination(view: &ViewState) -> String {
    let total_pages = view.total_pages();
    if view.search_type != SearchType::Keyword || view.total == 0 || total_pages <= 1 {
        return String::new();
    }

    let current = view.current_page();
    let prev = page_button(view, current.wrapping_sub(1), "上一页");
    let next = page_button(view, current + 1, "下一页");

    format!(
        r#"<div class="pagination">{prev}<span class="page-info"> 第 {current} / {total_pages} 页 </span>{next}</div>"#,
    )
}

fn page_button(view: &ViewState, target_page: u32, label: &str) -> String {
    match view.page_change_target(target_page) {
        Some(target) => format!(
            r#"<a class="page-button" href="{}">{label}</a>"#,
            results_href(&target.text, target.page)
        ),
        None => format!(r#"<span class="page-button disabled">{label}</span>"#),
    }
}

pub fn results_href(query: &str, page: u32) -> String {
    format!("/results?q={}&page={}", urlencoding::encode(query), page)
}

/// The document detail page, four sections as served by the backend.
pub fn detail_page(detail: &DocumentDetail) -> String {
    let content = format!(
        r#"<div class="detail-header">
    <h1>{}</h1>
</div>
<div class="detail-section">
    <h2>基本情况：</h2>
    <div class="content-scroll-area">{}</div>
</div>
<div class="detail-section">
    <h2>全文：</h2>
    <div class="content-scroll-area">{}</div>
</div>
<div class="detail-section">
    <h2>分析过程：</h2>
    <div class="content-scroll-area">{}</div>
</div>
<div class="detail-section">
    <h2>判决结果：</h2>
    <div class="content-scroll-area">{}</div>
</div>
<div class="detail-footer">
    <a href="javascript:history.back()" class="search-button">返回搜索结果</a>
</div>"#,
        trusted_html(&detail.title),
        trusted_html(&detail.abstract_text),
        trusted_html(&detail.content),
        trusted_html(&detail.analysis),
        trusted_html(&detail.result),
    );

    base_template("案例详情", &content)
}

pub fn detail_not_found() -> String {
    let content = r#"<p class="no-results-message">未找到相关信息</p>
<div class="detail-footer">
    <a href="javascript:history.back()" class="search-button">返回搜索结果</a>
</div>"#;
    base_template("案例详情", content)
}

/// Minimal stylesheet; layout only, no theming.
pub const CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #222; }
.container { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
.title { text-align: center; }
.search-bar { display: flex; gap: 0.5rem; justify-content: center; }
.search-input { flex: 1; max-width: 32rem; padding: 0.5rem; }
.search-button, .upload-button, .page-button { padding: 0.5rem 1rem; cursor: pointer; }
.page-button.disabled { color: #999; cursor: default; }
.divider { text-align: center; margin: 1.5rem 0; color: #666; }
.upload-section { text-align: center; }
.alert { color: #b00020; text-align: center; }
.results-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
.result-card { border: 1px solid #ddd; border-radius: 4px; padding: 1rem; }
.result-title a { color: inherit; }
.result-tags .tag { display: inline-block; background: #eee; border-radius: 3px; padding: 0 0.4rem; margin-right: 0.3rem; font-size: 0.85rem; }
.pagination { text-align: center; margin: 1.5rem 0; }
.content-scroll-area { max-height: 20rem; overflow-y: auto; border: 1px solid #eee; padding: 0.75rem; }
em { color: #b00020; font-style: normal; }
"#;
