use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lang_router_plugin::config::RouterWiring;
use lang_router_plugin::transform::{InstallArgs, add_import, replace_install_directive, rewrite_markup_tag};

/// A router module with `route_count` routes and a large import block
fn generate_router_module(route_count: usize) -> String {
    let mut text = String::from("import Vue from 'vue'\nimport VueRouter, { RouteConfig } from 'vue-router'\n");
    for i in 0..route_count {
        text.push_str(&format!("import View{} from '../views/View{}.vue'\n", i, i));
    }
    text.push_str("\nVue.use(VueRouter)\n\nconst routes: Array<RouteConfig> = [\n");
    for i in 0..route_count {
        text.push_str(&format!(
            "  {{\n    path: '/view-{}',\n    name: 'View{}',\n    component: View{}\n  }},\n",
            i, i, i
        ));
    }
    text.push_str("]\n\nconst router = new VueRouter({\n  routes\n})\n\nexport default router\n");
    text
}

/// A template with `link_count` links, every tenth one inside a switcher
fn generate_markup(link_count: usize) -> String {
    let mut text = String::from("<template>\n  <div id=\"nav\">\n");
    for i in 0..link_count {
        if i % 10 == 0 {
            text.push_str(&format!(
                "    <language-switcher>\n      <router-link to=\"/{}\">{}</router-link>\n    </language-switcher>\n",
                i, i
            ));
        } else {
            text.push_str(&format!("    <router-link to=\"/{}\">{}</router-link>\n", i, i));
        }
    }
    text.push_str("  </div>\n</template>\n");
    text
}

fn benchmark_router_rewrite(c: &mut Criterion) {
    let wiring = RouterWiring::default();
    let args = InstallArgs {
        default_language: Some("en".to_string()),
        translations: Some("translations".to_string()),
        localized_urls: Some("localizedURLs".to_string()),
    };
    let import_line = wiring.router_import_line();

    let mut group = c.benchmark_group("router_rewrite");
    for routes in [10, 100, 1000] {
        let text = generate_router_module(routes);
        group.bench_with_input(BenchmarkId::from_parameter(routes), &text, |b, text| {
            b.iter(|| {
                let imported = add_import(black_box(text), &wiring.from_symbol, &import_line);
                replace_install_directive(&imported, &wiring, &args)
            })
        });
    }
    group.finish();
}

fn benchmark_markup_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_rewrite");
    for links in [10, 100, 1000] {
        let text = generate_markup(links);
        group.bench_with_input(BenchmarkId::from_parameter(links), &text, |b, text| {
            b.iter(|| rewrite_markup_tag(black_box(text), "router-link", "localized-link", "language-switcher"))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_router_rewrite, benchmark_markup_rewrite);
criterion_main!(benches);
