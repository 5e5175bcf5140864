//! 端末向けの簡易表示

use std::fmt;
use texture_scan_common::{ImageRef, Product, ScaledProperty};

fn yes_no(flag: bool) -> &'static str {
    if flag { "○" } else { "×" }
}

fn score_line(f: &mut fmt::Formatter<'_>, name: &str, p: &ScaledProperty) -> fmt::Result {
    writeln!(f, "  {:<18} {:>4}  {}", name, p.value, p.description)
}

fn image_line(image: &ImageRef) -> String {
    match image.mime_type() {
        Some(mime_type) => format!("インライン ({})", mime_type),
        None => image.as_str().to_string(),
    }
}

/// カタログ一覧（選択中に `*`）
pub struct CatalogReport<'a, P> {
    pub products: &'a [P],
    pub selected: Option<&'a str>,
}

impl<P: AsRef<Product>> fmt::Display for CatalogReport<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.products {
            let p = p.as_ref();
            let mark = if Some(p.id.as_str()) == self.selected { "*" } else { " " };
            writeln!(
                f,
                "{} {:<24} {:<26} {} ({})",
                mark, p.label, p.scan_id, p.material_analysis.material_type, p.material_analysis.confidence
            )?;
        }
        Ok(())
    }
}

/// 1件の詳細
pub struct ProductReport<'a>(pub &'a Product);

impl fmt::Display for ProductReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = self.0;
        let a = &product.material_analysis;
        let t = &a.texture_properties;
        let w = &a.wearable_properties;
        let r = &a.weather_recommendations;

        writeln!(f, "{} [{}]", a.material_type, a.confidence)?;
        writeln!(f, "  id: {}  scan: {}  label: {}", product.id, product.scan_id, product.label)?;
        writeln!(f, "  画像: {}", image_line(&product.image))?;

        writeln!(f, "質感:")?;
        score_line(f, "smoothness", &t.smoothness)?;
        score_line(f, "roughness", &t.roughness)?;
        score_line(f, "stretchiness", &t.stretchiness)?;
        writeln!(f, "  {:<18} {:>4}  {}", "thickness", t.thickness.value, t.thickness.description)?;

        writeln!(f, "着用:")?;
        writeln!(
            f,
            "  {:<18} {:>4}  {}",
            "skin_contact",
            yes_no(w.skin_contact.recommended),
            w.skin_contact.description
        )?;
        score_line(f, "breathability", &w.breathability)?;
        score_line(f, "moisture_wicking", &w.moisture_wicking)?;
        score_line(f, "insulation", &w.insulation)?;

        writeln!(f, "気候:")?;
        for (name, s) in [("cool_weather", &r.cool_weather), ("warm_weather", &r.warm_weather), ("indoor", &r.indoor)] {
            writeln!(f, "  {:<18} {:>4}  {}", name, yes_no(s.suitable), s.description)?;
        }

        writeln!(f, "特徴: {}", a.key_characteristics.join(" / "))?;
        writeln!(f, "用途: {}", a.ideal_usage_scenarios.join(" / "))?;
        writeln!(f, "色: {} ({})", a.color_analysis.true_color, a.color_analysis.color_consistency)?;
        if let Some(tactile) = &a.tactile_data {
            writeln!(f, "触覚: roughness {} / stiffness {}", tactile.roughness, tactile.stiffness)?;
        }
        Ok(())
    }
}

pub fn render_catalog<P: AsRef<Product>>(products: &[P], selected: Option<&str>) -> String {
    CatalogReport { products, selected }.to_string()
}

pub fn render_product(product: &Product) -> String {
    ProductReport(product).to_string()
}
