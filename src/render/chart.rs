//! plotly.js figure model for the two chart kinds.
//!
//! Only the attributes the charts set are modelled; everything serializes
//! straight into the `data` / `layout` objects `Plotly.newPlot` expects.

use serde::Serialize;

use super::ChartKind;
use crate::color::ColorScale;
use crate::data::model::ColumnMeta;

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Parcats { dimensions: Vec<Dimension>, line: Line },
    Parcoords { dimensions: Vec<Dimension>, line: Line },
}

#[derive(Debug, Clone, Serialize)]
pub struct Dimension {
    pub label: String,
    pub values: Cells,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoryorder: Option<&'static str>,
}

/// Column values of one axis. Non-finite numbers serialize as `null`,
/// which plotly treats as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cells {
    Text(Vec<Option<String>>),
    Numeric(Vec<f64>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: Vec<u8>,
    pub coloraxis: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub coloraxis: ColorAxis,
    pub margin: Margin,
    pub font: Font,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorAxis {
    pub colorscale: Vec<(f64, String)>,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
    pub tickmode: &'static str,
    pub tickvals: [u8; 2],
    pub ticktext: [&'static str; 2],
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    pub showarrow: bool,
    pub align: &'static str,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
}

impl Figure {
    /// Assemble a chart: one trace over `dimensions`, coloured by the
    /// membership flags, with an optional statistics annotation.
    pub fn new(
        kind: ChartKind,
        mut dimensions: Vec<Dimension>,
        membership: Vec<u8>,
        annotation: Option<String>,
    ) -> Self {
        let line = Line {
            color: membership,
            coloraxis: "coloraxis",
        };
        let trace = match kind {
            ChartKind::ParallelCategories => {
                for dim in &mut dimensions {
                    dim.categoryorder = Some("category descending");
                }
                Trace::Parcats { dimensions, line }
            }
            ChartKind::ParallelCoordinates => Trace::Parcoords { dimensions, line },
        };

        let annotations = annotation
            .map(|text| {
                let (font, y) = match kind {
                    ChartKind::ParallelCategories => (Some(Font { size: 20 }), -0.11),
                    ChartKind::ParallelCoordinates => (None, -0.1),
                };
                Annotation {
                    text,
                    font,
                    showarrow: false,
                    align: "left",
                    xanchor: "right",
                    yanchor: "bottom",
                    xref: "paper",
                    yref: "paper",
                    x: 1.1,
                    y,
                }
            })
            .into_iter()
            .collect();

        Figure {
            data: vec![trace],
            layout: Layout {
                coloraxis: ColorAxis {
                    // Membership is binary, so only the scale's ends are used.
                    colorscale: ColorScale::mint().to_plotly(2),
                    colorbar: ColorBar {
                        title: Title {
                            text: "In Bic".to_string(),
                        },
                        tickmode: "array",
                        tickvals: [0, 1],
                        ticktext: ["No", "Yes"],
                        x: 1.1,
                    },
                },
                margin: Margin { l: 125 },
                font: Font { size: 25 },
                annotations,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Annotation text
// ---------------------------------------------------------------------------

/// `P-value = 1.000e-02`, followed by one `<value> = <lift>` line per
/// declared value of the first attribute when lifts are available.
pub fn annotation_text(pvalue: f64, meta: &[ColumnMeta], lifts: Option<&[f64]>) -> String {
    let mut text = format!("P-value = {}", format_scientific(pvalue));

    let declared = meta.first().map(|m| m.values.as_slice()).unwrap_or_default();
    if let Some(lifts) = lifts.filter(|_| !declared.is_empty()) {
        if lifts.len() != declared.len() {
            log::warn!(
                "{} lift(s) for {} declared value(s); pairing by position",
                lifts.len(),
                declared.len()
            );
        }
        text.push_str("<br>Lift:<br>");
        for (value, lift) in declared.iter().zip(lifts) {
            text.push_str(&format!("    {value} = {}<br>", format_rounded(*lift)));
        }
    }
    text
}

/// Three-decimal scientific notation with a signed, two-digit exponent.
pub fn format_scientific(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string().to_lowercase();
    }
    let s = format!("{v:.3e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

/// Round to three decimals, halves to even; whole numbers keep a
/// trailing `.0`.
pub fn format_rounded(v: f64) -> String {
    let r = (v * 1000.0).round_ties_even() / 1000.0;
    if r.is_finite() && r.fract() == 0.0 {
        format!("{r:.1}")
    } else {
        format!("{r}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(values: &[&str]) -> Vec<ColumnMeta> {
        vec![ColumnMeta {
            name: "class".into(),
            values: values.iter().map(|s| s.to_string()).collect(),
        }]
    }

    #[test]
    fn scientific_format() {
        assert_eq!(format_scientific(0.01), "1.000e-02");
        assert_eq!(format_scientific(12346.0), "1.235e+04");
        assert_eq!(format_scientific(2.3e-120), "2.300e-120");
        assert_eq!(format_scientific(1.0), "1.000e+00");
    }

    #[test]
    fn rounded_format() {
        assert_eq!(format_rounded(1.5), "1.5");
        assert_eq!(format_rounded(2.0), "2.0");
        assert_eq!(format_rounded(1.23456), "1.235");
        assert_eq!(format_rounded(0.0625), "0.062");
        assert_eq!(format_rounded(1.0625), "1.062");
        assert_eq!(format_rounded(0.3125), "0.312");
    }

    #[test]
    fn annotation_without_lifts() {
        assert_eq!(annotation_text(0.01, &meta(&["A", "B"]), None), "P-value = 1.000e-02");
        assert_eq!(annotation_text(0.01, &[], Some(&[1.0][..])), "P-value = 1.000e-02");
        assert_eq!(annotation_text(0.01, &meta(&[]), Some(&[1.0][..])), "P-value = 1.000e-02");
    }

    #[test]
    fn annotation_with_lifts() {
        let text = annotation_text(0.5, &meta(&["A", "B"]), Some(&[1.5, 0.25][..]));
        assert_eq!(
            text,
            "P-value = 5.000e-01<br>Lift:<br>    A = 1.5<br>    B = 0.25<br>"
        );
    }

    #[test]
    fn categorical_figure_orders_categories() {
        let dims = vec![Dimension {
            label: "a".into(),
            values: Cells::Text(vec![Some("x".into()), None]),
            categoryorder: None,
        }];
        let fig = Figure::new(ChartKind::ParallelCategories, dims, vec![1, 0], Some("p".into()));
        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["data"][0]["type"], "parcats");
        assert_eq!(json["data"][0]["dimensions"][0]["categoryorder"], "category descending");
        assert_eq!(json["data"][0]["dimensions"][0]["values"][1], serde_json::Value::Null);
        assert_eq!(json["layout"]["annotations"][0]["y"], -0.11);
        assert_eq!(json["layout"]["coloraxis"]["colorbar"]["ticktext"][1], "Yes");
    }

    #[test]
    fn numeric_figure_has_no_annotation_without_pvalue() {
        let dims = vec![Dimension {
            label: "a".into(),
            values: Cells::Numeric(vec![1.0, f64::NAN]),
            categoryorder: None,
        }];
        let fig = Figure::new(ChartKind::ParallelCoordinates, dims, vec![0, 1], None);
        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["data"][0]["type"], "parcoords");
        assert!(json["data"][0]["dimensions"][0].get("categoryorder").is_none());
        assert!(json["data"][0]["dimensions"][0]["values"][1].is_null());
        assert!(json["layout"].get("annotations").is_none());
    }
}
