//! SVG certificate view
//!
//! One template renders every certificate; the two presentational variants
//! of the UI are a [`Theme`] parameter, not duplicated layouts.

use certforge_common::CertificateData;

/// Logical page size of the certificate view, before upscaling.
pub const VIEW_WIDTH: u32 = 1000;
pub const VIEW_HEIGHT: u32 = 700;

/// Presentation variant for the certificate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Indigo-accented layout with a tinted border frame.
    #[default]
    Classic,
    /// Monochrome layout for plain printing.
    Plain,
}

impl Theme {
    fn accent(&self) -> &'static str {
        match self {
            Theme::Classic => "#4f46e5",
            Theme::Plain => "#111827",
        }
    }

    fn frame(&self) -> &'static str {
        match self {
            Theme::Classic => "#e0e7ff",
            Theme::Plain => "#d1d5db",
        }
    }

    fn heading(&self) -> &'static str {
        "#111827"
    }

    fn muted(&self) -> &'static str {
        "#4b5563"
    }

    fn footnote(&self) -> &'static str {
        "#6b7280"
    }

    fn serif(&self) -> &'static str {
        "Georgia, 'Times New Roman', serif"
    }

    fn sans(&self) -> &'static str {
        "'Helvetica Neue', Arial, sans-serif"
    }
}

/// Builds the certificate view as a self-contained SVG document.
pub struct CertificateTemplate {
    theme: Theme,
}

impl CertificateTemplate {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Render the full certificate view for one record.
    pub fn render_svg(&self, data: &CertificateData) -> String {
        let t = self.theme;
        let name = xml_escape(&data.details.name);
        let deployment = xml_escape(&data.details.vercel_deployment);
        let repo = xml_escape(&data.details.github_repo);
        let certificate_id = xml_escape(&data.certificate_id);
        let date = xml_escape(&data.date);

        let mut svg = String::with_capacity(4096);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{VIEW_WIDTH}\" height=\"{VIEW_HEIGHT}\" \
             viewBox=\"0 0 {VIEW_WIDTH} {VIEW_HEIGHT}\">\n"
        ));

        // Background and border frame
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        svg.push_str(&format!(
            "<rect x=\"12\" y=\"12\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"16\" rx=\"8\"/>\n",
            VIEW_WIDTH - 24,
            VIEW_HEIGHT - 24,
            t.frame(),
        ));

        // Header seal
        svg.push_str(&format!(
            "<circle cx=\"500\" cy=\"96\" r=\"34\" fill=\"none\" stroke=\"{}\" stroke-width=\"4\"/>\n\
             <circle cx=\"500\" cy=\"96\" r=\"22\" fill=\"{}\"/>\n",
            t.accent(),
            t.accent(),
        ));
        svg.push_str(&self.centered_text(
            "Certificate of Completion",
            170,
            32,
            t.heading(),
            t.serif(),
            "bold",
        ));

        // Body
        svg.push_str(&self.centered_text(
            "This is to certify that",
            232,
            18,
            t.muted(),
            t.sans(),
            "normal",
        ));
        svg.push_str(&self.centered_text(&name, 296, 44, t.heading(), t.serif(), "bold"));
        svg.push_str(&self.centered_text(
            "has successfully completed a web development project",
            348,
            18,
            t.muted(),
            t.sans(),
            "normal",
        ));
        svg.push_str(&format!(
            "<text x=\"500\" y=\"396\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"16\" fill=\"{}\">Project deployed at: <tspan fill=\"{}\" font-weight=\"500\">{}</tspan></text>\n",
            t.sans(),
            t.muted(),
            t.accent(),
            deployment,
        ));
        svg.push_str(&format!(
            "<text x=\"500\" y=\"428\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"16\" fill=\"{}\">GitHub Repository: <tspan fill=\"{}\" font-weight=\"500\">{}</tspan></text>\n",
            t.sans(),
            t.muted(),
            t.accent(),
            repo,
        ));

        // Footer: date block (left) and signature block (right)
        svg.push_str(&format!(
            "<line x1=\"120\" y1=\"540\" x2=\"320\" y2=\"540\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            t.muted(),
        ));
        svg.push_str(&format!(
            "<text x=\"120\" y=\"562\" font-family=\"{}\" font-size=\"13\" fill=\"{}\">Date</text>\n",
            t.sans(),
            t.footnote(),
        ));
        svg.push_str(&format!(
            "<text x=\"120\" y=\"584\" font-family=\"{}\" font-size=\"16\" fill=\"{}\">{}</text>\n",
            t.sans(),
            t.heading(),
            date,
        ));

        // Signature flourish above the signature line
        svg.push_str(&format!(
            "<path d=\"M 690 516 C 716 492, 744 540, 770 508 S 830 500, 856 514\" fill=\"none\" stroke=\"{}\" stroke-width=\"3\" stroke-linecap=\"round\"/>\n",
            t.accent(),
        ));
        svg.push_str(&format!(
            "<line x1=\"680\" y1=\"540\" x2=\"880\" y2=\"540\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            t.muted(),
        ));
        svg.push_str(&format!(
            "<text x=\"680\" y=\"562\" font-family=\"{}\" font-size=\"13\" fill=\"{}\">Instructor Signature</text>\n",
            t.sans(),
            t.footnote(),
        ));
        svg.push_str(&format!(
            "<text x=\"680\" y=\"584\" font-family=\"{}\" font-size=\"16\" fill=\"{}\">Jane Smith</text>\n",
            t.sans(),
            t.heading(),
        ));

        // Certificate ID footer
        svg.push_str(&self.centered_text(
            &format!("Certificate ID: {certificate_id}"),
            636,
            14,
            t.footnote(),
            t.sans(),
            "normal",
        ));
        svg.push_str(&self.centered_text(
            "Verify this certificate at certificates.example.com",
            660,
            14,
            t.footnote(),
            t.sans(),
            "normal",
        ));

        svg.push_str("</svg>\n");
        svg
    }

    fn centered_text(
        &self,
        content: &str,
        y: u32,
        size: u32,
        fill: &str,
        family: &str,
        weight: &str,
    ) -> String {
        format!(
            "<text x=\"500\" y=\"{y}\" text-anchor=\"middle\" font-family=\"{family}\" \
             font-size=\"{size}\" font-weight=\"{weight}\" fill=\"{fill}\">{content}</text>\n"
        )
    }
}

/// Escape a string for interpolation into SVG text content or attributes.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
