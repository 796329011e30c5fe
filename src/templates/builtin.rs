//! Example i18n files rendered into `src/lang/` of the target project.

use super::TemplateSource;

const TRANSLATIONS_INDEX: &str = r#"import en from './en.json'

// Add a language here and a matching JSON file next to this one.
// Languages other than the default one are loaded on demand.
const translations = {
	en: {
		name: 'English',
		messages: en,
	},
	cs: {
		name: 'Česky',
		load: () => import('./cs.json'),
	},
};

export const defaultLanguage = '{{DEFAULT_LANGUAGE}}';

export default translations;
"#;

const TRANSLATIONS_EN: &str = r#"{
	"Home": "Home",
	"About": "About",
	"Welcome to Your Vue.js App": "Welcome to Your Vue.js App"
}
"#;

const TRANSLATIONS_CS: &str = r#"{
	"Home": "Domů",
	"About": "O nás",
	"Welcome to Your Vue.js App": "Vítejte ve vaší Vue.js aplikaci"
}
"#;

const LOCALIZED_URLS_INDEX: &str = r#"import cs from './cs.json'

// Translated URL segments, keyed by language
const localizedURLs = {
	cs,
};

export default localizedURLs;
"#;

const LOCALIZED_URLS_CS: &str = r#"{
	"about": "o-nas"
}
"#;

pub fn example_templates() -> Vec<TemplateSource> {
    [
        ("src/lang/translations/index.{{SCRIPT_EXT}}", TRANSLATIONS_INDEX),
        ("src/lang/translations/en.json", TRANSLATIONS_EN),
        ("src/lang/translations/cs.json", TRANSLATIONS_CS),
        ("src/lang/localized-urls/index.{{SCRIPT_EXT}}", LOCALIZED_URLS_INDEX),
        ("src/lang/localized-urls/cs.json", LOCALIZED_URLS_CS),
    ]
    .into_iter()
    .map(|(relative, content)| TemplateSource {
        relative: relative.to_string(),
        content: content.to_string(),
    })
    .collect()
}

/// Import lines the router file needs once the example files exist
pub fn router_imports() -> [(&'static str, &'static str); 2] {
    [
        ("translations", "import translations from '../lang/translations'"),
        ("localizedURLs", "import localizedURLs from '../lang/localized-urls'"),
    ]
}
