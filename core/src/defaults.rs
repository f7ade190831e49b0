//! Built-in shortcut list used on first run and when the stored slot is unusable.

use tabking_types::{Link, ShortcutEntry, ShortcutId, ShortcutList};

const DEFAULT_LINKS: &[(&str, &str, &str, &str)] = &[
    ("1", "知乎", "https://www.zhihu.com", "/svg/www.zhihu.com.png"),
    ("2", "GiHub", "https://github.com", "/svg/github.svg"),
    ("3", "抖音", "https://www.douyin.com", "/svg/www.douyin.com.png"),
    ("4", "网易云", "https://music.163.com", "/svg/music.163.com.png"),
    ("5", "DeepSeek", "https://chat.deepseek.com", "/svg/deepseek.png"),
    ("6", "Qwen AI", "https://chat.qwen.ai", "/svg/chat.qwen.ai.png"),
    ("7", "AI Studio", "https://aistudio.google.com", "/svg/aistudio.google.com.jpg"),
    ("8", "V2EX", "https://www.v2ex.com", "/svg/www.v2ex.com.jpg"),
    ("9", "哔哩哔哩", "https://www.bilibili.com", "/svg/www.bilibili.com.jpg"),
    ("10", "腾讯视频", "https://v.qq.com", "/svg/v.qq.com.jpg"),
    ("11", "YouTube", "https://www.youtube.com", "/svg/www.youtube.com.png"),
    ("12", "微信读书", "https://weread.qq.com", "/svg/weread.qq.com.jpg"),
    ("13", "Gitee", "https://gitee.com", "/svg/gitee.com.png"),
    ("14", "翻译", "https://translate.google.com", "/svg/translate.google.com.png"),
];

#[must_use]
pub fn default_shortcuts() -> ShortcutList {
    let entries = DEFAULT_LINKS
        .iter()
        .filter_map(|&(id, title, url, icon)| {
            let id = ShortcutId::new(id).ok()?;
            Some(ShortcutEntry::Link(Link::new(id, title, url).with_icon(icon)))
        })
        .collect();
    ShortcutList::new(entries).unwrap_or_default()
}
