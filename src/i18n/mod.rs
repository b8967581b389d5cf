//! Internationalization (i18n) support for the blog listing

use anyhow::Result;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::blog::SortKey;

/// Language used when a requested one has no table
pub const FALLBACK_LANGUAGE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("blog", "Blog"),
    (
        "blog_description",
        "Product news and best practices for teams building with Claude.",
    ),
    ("filter_and_sort", "Filter and sort"),
    ("sort_by", "Sort by"),
    ("category", "Category"),
    ("difficulty", "Difficulty"),
    ("tags", "Tags"),
    ("search", "Search posts"),
    ("posts", "posts"),
    ("newest", "Newest"),
    ("oldest", "Oldest"),
    ("a_to_z", "Alphabetically (A to Z)"),
    ("z_to_a", "Alphabetically (Z to A)"),
    ("no_results", "No posts found matching your criteria."),
    ("clear_filters", "Clear all filters"),
    ("categories.development", "Development"),
    ("categories.ai-ml", "AI & Machine Learning"),
    ("difficulties.beginner", "Beginner"),
    ("difficulties.intermediate", "Intermediate"),
    ("difficulties.advanced", "Advanced"),
];

const ZH: &[(&str, &str)] = &[
    ("blog", "博客"),
    ("blog_description", "使用 Claude 构建团队的产品新闻和最佳实践。"),
    ("filter_and_sort", "筛选和排序"),
    ("sort_by", "排序方式"),
    ("category", "分类"),
    ("difficulty", "难度"),
    ("tags", "标签"),
    ("search", "搜索文章"),
    ("posts", "篇文章"),
    ("newest", "最新"),
    ("oldest", "最旧"),
    ("a_to_z", "按字母顺序 (A 到 Z)"),
    ("z_to_a", "按字母顺序 (Z 到 A)"),
    ("no_results", "没有找到符合条件的文章。"),
    ("clear_filters", "清除所有筛选"),
    ("categories.development", "开发"),
    ("categories.ai-ml", "AI 与机器学习"),
    ("difficulties.beginner", "初级"),
    ("difficulties.intermediate", "中级"),
    ("difficulties.advanced", "高级"),
];

const FR: &[(&str, &str)] = &[
    ("blog", "Blog"),
    (
        "blog_description",
        "Actualités produits et meilleures pratiques pour les équipes utilisant Claude.",
    ),
    ("filter_and_sort", "Filtrer et trier"),
    ("sort_by", "Trier par"),
    ("category", "Catégorie"),
    ("difficulty", "Difficulté"),
    ("tags", "Étiquettes"),
    ("search", "Rechercher des articles"),
    ("posts", "articles"),
    ("newest", "Plus récent"),
    ("oldest", "Plus ancien"),
    ("a_to_z", "Alphabétique (A à Z)"),
    ("z_to_a", "Alphabétique (Z à A)"),
    ("no_results", "Aucun article ne correspond à vos critères."),
    ("clear_filters", "Effacer tous les filtres"),
    ("categories.development", "Développement"),
    ("categories.ai-ml", "IA et Apprentissage Automatique"),
    ("difficulties.beginner", "Débutant"),
    ("difficulties.intermediate", "Intermédiaire"),
    ("difficulties.advanced", "Avancé"),
];

/// Blog UI translations keyed by language, then by dotted key
#[derive(Debug, Clone)]
pub struct I18n {
    translations: HashMap<String, IndexMap<String, String>>,
}

impl I18n {
    /// Create a handler holding the built-in en / zh / fr tables
    pub fn new() -> Self {
        let mut translations = HashMap::new();
        for (lang, table) in [("en", EN), ("zh", ZH), ("fr", FR)] {
            let table: IndexMap<String, String> = table
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            translations.insert(lang.to_string(), table);
        }
        Self { translations }
    }

    /// Load language files from a directory, overriding built-in entries.
    ///
    /// Each `<lang>.yml`, `<lang>.yaml` or `<lang>.json` file holds a
    /// (possibly nested) mapping of keys to strings.
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml") | Some("json")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let lang = lang.to_lowercase();

            let content = fs::read_to_string(&path)?;
            // JSON documents are valid YAML
            match serde_yaml::from_str::<serde_yaml::Value>(&content) {
                Ok(data) => {
                    let table = self.translations.entry(lang).or_default();
                    flatten_translations(&data, "", table);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// The table used for `lang`: its own when known, English otherwise
    pub fn language_for(&self, lang: &str) -> String {
        let lang = lang.to_lowercase();
        if self.translations.contains_key(&lang) {
            lang
        } else {
            FALLBACK_LANGUAGE.to_string()
        }
    }

    /// Get a translation by key, falling back to English and then to the key
    pub fn get(&self, lang: &str, key: &str) -> String {
        let lang = self.language_for(lang);
        [lang.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|l| self.translations.get(*l).and_then(|t| t.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Every key for `lang`, with English filling the gaps
    pub fn table(&self, lang: &str) -> IndexMap<String, String> {
        let lang = self.language_for(lang);
        let mut result = self.translations.get(&lang).cloned().unwrap_or_default();

        if lang != FALLBACK_LANGUAGE {
            if let Some(en) = self.translations.get(FALLBACK_LANGUAGE) {
                for (k, v) in en {
                    result.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
        }

        result
    }

    /// Label of a category, or the raw value when it has none
    pub fn translate_category(&self, category: Option<&str>, lang: &str) -> String {
        self.translate_value("categories", category, lang)
    }

    /// Label of a difficulty, or the raw value when it has none
    pub fn translate_difficulty(&self, difficulty: Option<&str>, lang: &str) -> String {
        self.translate_value("difficulties", difficulty, lang)
    }

    /// Label of a sort option
    pub fn sort_label(&self, sort: SortKey, lang: &str) -> String {
        let key = match sort {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::TitleAsc => "a_to_z",
            SortKey::TitleDesc => "z_to_a",
        };
        self.get(lang, key)
    }

    fn translate_value(&self, group: &str, value: Option<&str>, lang: &str) -> String {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return String::new();
        };

        let lang = self.language_for(lang);
        self.translations
            .get(&lang)
            .and_then(|t| t.get(&format!("{}.{}", group, value)))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a YAML mapping into dot-notation keys
fn flatten_translations(
    value: &serde_yaml::Value,
    prefix: &str,
    result: &mut IndexMap<String, String>,
) {
    let serde_yaml::Value::Mapping(map) = value else {
        return;
    };

    for (key, value) in map {
        let Some(key) = key.as_str() else {
            continue;
        };
        let full_key = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_yaml::Value::String(s) => {
                result.insert(full_key, s.clone());
            }
            serde_yaml::Value::Number(n) => {
                result.insert(full_key, n.to_string());
            }
            serde_yaml::Value::Bool(b) => {
                result.insert(full_key, b.to_string());
            }
            serde_yaml::Value::Mapping(_) => {
                flatten_translations(value, &full_key, result);
            }
            _ => {}
        }
    }
}
