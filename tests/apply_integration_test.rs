use lang_router_plugin::test_helpers::TestProject;
use lang_router_plugin::{Config, Orchestrator, OsFileSystem, PluginError, Step, StepOutcome};
use std::path::Path;

fn default_run_config() -> Config {
    let mut config = Config::default();
    config.options.interactive = false;
    config
}

#[test]
fn test_apply_wires_javascript_project() {
    let project = TestProject::vue_cli().unwrap();
    let root = project.root();
    let config = default_run_config();

    let report = Orchestrator::new(&config, OsFileSystem).run(root).unwrap();

    assert_eq!(report.warnings().count(), 0, "{:?}", report.diagnostics);
    assert_eq!(
        project.read_file("src/router/index.js").unwrap(),
        "import Vue from 'vue'
import { LangRouter } from 'vue-lang-router'
import Home from '../views/Home.vue'
import translations from '../lang/translations'
import localizedURLs from '../lang/localized-urls'

Vue.use(LangRouter, {
  defaultLanguage: 'en',
  translations,
  localizedURLs,
})

const routes = [
  {
    path: '/',
    name: 'Home',
    component: Home
  },
  {
    path: '/about',
    name: 'About',
    component: () => import(/* webpackChunkName: \"about\" */ '../views/About.vue')
  }
]

const router = new LangRouter({
  routes
})

export default router
"
    );

    assert_eq!(
        project.read_file("src/main.js").unwrap(),
        "import Vue from 'vue'
import App from './App.vue'
import router from './router'
import { i18n } from 'vue-lang-router'

Vue.config.productionTip = false

new Vue({
  i18n,
  router,
  render: h => h(App)
}).$mount('#app')
"
    );

    let app = project.read_file("src/App.vue").unwrap();
    assert!(app.contains("<localized-link to=\"/\">Home</localized-link>"));
    assert!(app.contains("<localized-link to=\"/about\">About</localized-link>"));
    assert!(!app.contains("language-switcher"));

    let package: serde_json::Value = serde_json::from_str(&project.read_file("package.json").unwrap()).unwrap();
    assert_eq!(package["dependencies"]["vue-lang-router"], "^1.2.0");

    assert!(root.join("src/lang/translations/index.js").exists());
    assert!(root.join("src/lang/translations/en.json").exists());
    assert!(root.join("src/lang/localized-urls/index.js").exists());
}

#[test]
fn test_second_run_changes_nothing() {
    let project = TestProject::vue_cli().unwrap();
    let root = project.root();
    let mut config = default_run_config();
    config.options.add_language_switcher = true;

    Orchestrator::new(&config, OsFileSystem).run(root).unwrap();
    let after_first = project.snapshot().unwrap();

    let report = Orchestrator::new(&config, OsFileSystem).run(root).unwrap();

    assert_eq!(project.snapshot().unwrap(), after_first);
    assert!(report.modified_files().is_empty());
    for step in [Step::Manifest, Step::Templates, Step::Entry, Step::Router, Step::Markup] {
        assert_eq!(report.outcome(step), Some(StepOutcome::Unchanged), "step {}", step);
    }

    let app = &after_first[Path::new("src/App.vue")];
    assert_eq!(app.matches("<language-switcher").count(), 1);
    // The switcher keeps its inner link
    assert!(app.contains("<router-link :to=\"link.url\""));
}

#[test]
fn test_apply_wires_typescript_project() {
    let project = TestProject::vue_cli_typescript().unwrap();
    let root = project.root();
    let mut config = default_run_config();
    config.options.render_template = false;

    let report = Orchestrator::new(&config, OsFileSystem).run(root).unwrap();

    assert_eq!(report.warnings().count(), 0, "{:?}", report.diagnostics);
    assert_eq!(
        project.read_file("src/router/index.ts").unwrap(),
        "import Vue from 'vue'
import { RouteConfig } from 'vue-router'
import Home from '../views/Home.vue'
import { LangRouter } from 'vue-lang-router'

Vue.use(LangRouter)

const routes: Array<RouteConfig> = [
  {
    path: '/',
    name: 'Home',
    component: Home
  }
]

const router = new LangRouter({
  routes
})

export default router
"
    );
    assert!(project.read_file("src/main.ts").unwrap().contains("import { i18n } from 'vue-lang-router'"));
    assert!(!root.join("src/lang").exists());
}

#[test]
fn test_missing_bootstrap_files_are_warnings() {
    let project = TestProject::vue_cli().unwrap();
    let root = project.root();
    project.remove_file("src/main.js").unwrap();
    project.remove_file("src/router/index.js").unwrap();
    let config = default_run_config();

    let report = Orchestrator::new(&config, OsFileSystem).run(root).unwrap();

    assert_eq!(report.outcome(Step::Entry), Some(StepOutcome::Skipped));
    assert_eq!(report.outcome(Step::Router), Some(StepOutcome::Skipped));
    assert_eq!(report.outcome(Step::Markup), Some(StepOutcome::Modified));
    assert!(report.warnings().any(|d| d.message.contains("main.js not found")));
    assert!(report.warnings().any(|d| d.message.contains("index.js not found")));
}

#[test]
fn test_missing_router_dependency_touches_nothing() {
    let project = TestProject::vue_cli().unwrap();
    let root = project.root();
    project.write_file("package.json", r#"{ "dependencies": { "vue": "^2.6.11" } }"#).unwrap();
    let before = project.snapshot().unwrap();
    let config = default_run_config();

    let err = Orchestrator::new(&config, OsFileSystem).run(root).unwrap_err();

    assert!(matches!(err, PluginError::Precondition(_)));
    assert_eq!(project.snapshot().unwrap(), before);
}

#[test]
fn test_existing_translation_files_are_kept() {
    let project = TestProject::vue_cli().unwrap();
    let root = project.root();
    project.write_file("src/lang/translations/en.json", "{ \"custom\": true }\n").unwrap();
    let config = default_run_config();

    let report = Orchestrator::new(&config, OsFileSystem).run(root).unwrap();

    assert_eq!(project.read_file("src/lang/translations/en.json").unwrap(), "{ \"custom\": true }\n");
    assert!(root.join("src/lang/translations/cs.json").exists());
    assert!(report.diagnostics.iter().any(|d| d.message.contains("already exists")));
}
