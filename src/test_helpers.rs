//! Test helpers for creating hermetic Vue CLI projects on disk
//!
//! # Usage
//!
//! ```rust,ignore
//! use lang_router_plugin::test_helpers::TestProject;
//!
//! let project = TestProject::vue_cli()?;
//! project.remove_file("src/App.vue")?;
//! // Now run the orchestrator against project.root()
//! ```

use crate::{PluginError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const PACKAGE_JSON: &str = r#"{
  "name": "my-app",
  "version": "0.1.0",
  "private": true,
  "scripts": {
    "serve": "vue-cli-service serve",
    "build": "vue-cli-service build"
  },
  "dependencies": {
    "core-js": "^3.6.5",
    "vue": "^2.6.11",
    "vue-router": "^3.2.0"
  },
  "devDependencies": {
    "@vue/cli-plugin-router": "~4.5.0",
    "@vue/cli-service": "~4.5.0",
    "vue-template-compiler": "^2.6.11"
  }
}
"#;

pub const MAIN_JS: &str = r#"import Vue from 'vue'
import App from './App.vue'
import router from './router'

Vue.config.productionTip = false

new Vue({
  router,
  render: h => h(App)
}).$mount('#app')
"#;

pub const ROUTER_JS: &str = r#"import Vue from 'vue'
import VueRouter from 'vue-router'
import Home from '../views/Home.vue'

Vue.use(VueRouter)

const routes = [
  {
    path: '/',
    name: 'Home',
    component: Home
  },
  {
    path: '/about',
    name: 'About',
    component: () => import(/* webpackChunkName: "about" */ '../views/About.vue')
  }
]

const router = new VueRouter({
  routes
})

export default router
"#;

pub const ROUTER_TS: &str = r#"import Vue from 'vue'
import VueRouter, { RouteConfig } from 'vue-router'
import Home from '../views/Home.vue'

Vue.use(VueRouter)

const routes: Array<RouteConfig> = [
  {
    path: '/',
    name: 'Home',
    component: Home
  }
]

const router = new VueRouter({
  routes
})

export default router
"#;

pub const APP_VUE: &str = r#"<template>
  <div id="app">
    <div id="nav">
      <router-link to="/">Home</router-link> |
      <router-link to="/about">About</router-link>
    </div>
    <router-view/>
  </div>
</template>
"#;

/// Temporary project directory, removed when dropped
pub struct TestProject {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()
            .map_err(|e| PluginError::Internal(format!("Failed to create temp directory: {}", e)))?;
        let project_root = temp_dir.path().to_path_buf();

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// A project as `vue create` with the router plugin leaves it
    pub fn vue_cli() -> Result<Self> {
        let project = Self::new()?;
        project.write_file("package.json", PACKAGE_JSON)?;
        project.write_file("src/main.js", MAIN_JS)?;
        project.write_file("src/router/index.js", ROUTER_JS)?;
        project.write_file("src/App.vue", APP_VUE)?;
        Ok(project)
    }

    /// The TypeScript flavour of [`TestProject::vue_cli`]
    pub fn vue_cli_typescript() -> Result<Self> {
        let project = Self::new()?;
        let package = PACKAGE_JSON.replace(
            "\"@vue/cli-plugin-router\": \"~4.5.0\",",
            "\"@vue/cli-plugin-router\": \"~4.5.0\",\n    \"@vue/cli-plugin-typescript\": \"~4.5.0\",\n    \"typescript\": \"~4.1.5\",",
        );
        project.write_file("package.json", &package)?;
        project.write_file("src/main.ts", MAIN_JS)?;
        project.write_file("src/router/index.ts", ROUTER_TS)?;
        project.write_file("src/App.vue", APP_VUE)?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path(relative))?)
    }

    pub fn remove_file(&self, relative: &str) -> Result<()> {
        Ok(fs::remove_file(self.path(relative))?)
    }

    /// Every file in the project with its content, keyed by relative path
    pub fn snapshot(&self) -> Result<BTreeMap<PathBuf, String>> {
        let mut files = BTreeMap::new();
        for entry in WalkDir::new(&self.project_root) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&self.project_root)
                    .map_err(|e| PluginError::Internal(e.to_string()))?
                    .to_path_buf();
                files.insert(relative, fs::read_to_string(entry.path())?);
            }
        }
        Ok(files)
    }
}
