//! LaTeX export of a generated resume.
//!
//! Output is a pure function of the sections and contact details: same input, same bytes.
//! Every piece of user or model text passes through `escape_latex`; URLs go into `\href`
//! targets with only `%`, `#` and `\` escaped so links keep working.

use crate::models::profile::BasicInfo;
use crate::models::resume::ResumeSections;

const PLACEHOLDER_NAME: &str = "Your Name";

const PREAMBLE: &str = r#"\documentclass[11pt,letterpaper]{article}

\usepackage[parfill]{parskip}
\usepackage{array}
\usepackage{ifthen}
\usepackage{enumitem}
\usepackage{xcolor}
\usepackage{amssymb}
\usepackage{tabularx}
\usepackage[none]{hyphenat}
\usepackage[left=0.3in,top=0.4in,right=0.3in,bottom=0.4in]{geometry}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\pagestyle{empty}
\sloppy

\renewcommand{\normalsize}{\fontsize{10.5pt}{13pt}\selectfont}
\definecolor{customblue}{RGB}{0, 102, 204}
\hypersetup{colorlinks=true, linkcolor=blue, urlcolor=blue, citecolor=blue}

\newenvironment{rSection}[1]{
  \medskip
  \textsc{\large #1}
  \medskip
  \hrule
  \begin{list}{}{\setlength{\leftmargin}{1.5em}}
  \item[]
}{
  \end{list}
}

\setlength\headheight{43pt}
\setlength{\headsep}{0.12in}
\pagestyle{fancy}
\fancyhf{}
\fancyhead[R]{\em Resume}
"#;

/// Escapes LaTeX special characters in one pass.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '"' => out.push_str("''"),
            other => out.push(other),
        }
    }
    out
}

fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '%' | '#' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out
}

fn contact_line(info: &BasicInfo) -> String {
    let mut parts = Vec::new();
    if !info.email.is_empty() {
        parts.push(format!(
            r"\href{{mailto:{}}}{{{}}}",
            escape_url(&info.email),
            escape_latex(&info.email)
        ));
    }
    if !info.phone.is_empty() {
        parts.push(escape_latex(&info.phone));
    }
    if !info.location.is_empty() {
        parts.push(escape_latex(&info.location));
    }
    let links = [
        (info.linkedin.as_str(), "LinkedIn"),
        (info.github.as_str(), "GitHub"),
        (info.portfolio.as_deref().unwrap_or_default(), "Portfolio"),
    ];
    for (url, label) in links {
        if !url.is_empty() {
            parts.push(format!(r"\href{{{}}}{{{label}}}", escape_url(url)));
        }
    }
    parts.join(r" \,$\cdot$\, ")
}

fn section_start(out: &mut String, title: &str) {
    out.push_str(&format!(
        "\n\\vspace{{-3mm}}\n\\begin{{rSection}}{{\\textbf{{\\textcolor{{customblue}}{{{title}}}}}}}\n"
    ));
}

fn bullet_list<'a>(out: &mut String, items: impl IntoIterator<Item = &'a String>) {
    out.push_str("\\begin{itemize}[noitemsep, nolistsep]\n");
    for item in items {
        out.push_str(&format!("  \\item {}\n", escape_latex(item)));
    }
    out.push_str("\\end{itemize}\n");
}

/// Renders a complete `.tex` document.
///
/// Section order: education, technical skills, projects, professional experience, summary.
pub fn generate_latex(sections: &ResumeSections, info: &BasicInfo) -> String {
    let mut out = String::from(PREAMBLE);

    let name = if info.full_name.trim().is_empty() {
        PLACEHOLDER_NAME
    } else {
        info.full_name.as_str()
    };
    let name = escape_latex(name);

    out.push_str(&format!("\\fancyhead[L]{{\\em {name}}}\n"));
    out.push_str("\n\\begin{document}\n\\thispagestyle{fancy}\n\n");
    out.push_str(&format!("\\begin{{center}}\n{{\\huge\\bf {name}}}\\\\[2pt]\n"));
    out.push_str(&format!("{}\n\\end{{center}}\n", contact_line(info)));

    section_start(&mut out, "EDUCATION");
    for edu in &sections.education {
        out.push_str(&format!(
            "{{\\bf {}}} \\hfill {{{} -- {}}}\\\\\n",
            escape_latex(&edu.school),
            escape_latex(&edu.start_date),
            escape_latex(&edu.end_date),
        ));
        out.push_str(&format!(
            "\\textit{{{} in {}}}\\\\\n",
            escape_latex(&edu.degree),
            escape_latex(&edu.field),
        ));
        if let Some(gpa) = edu.gpa.as_deref().filter(|g| !g.is_empty()) {
            out.push_str(&format!("\\textbf{{GPA:}} {}\\\\\n", escape_latex(gpa)));
        }
        if !edu.coursework.is_empty() {
            out.push_str(&format!(
                "\\textbf{{Relevant Coursework:}} {}\\\\\n",
                escape_latex(&edu.coursework),
            ));
        }
    }
    out.push_str("\\end{rSection}\n");

    section_start(&mut out, "TECHNICAL SKILLS");
    out.push_str("\\begin{itemize}[noitemsep, nolistsep]\n");
    for category in &sections.skills.categories {
        out.push_str(&format!(
            "  \\item \\textbf{{{}:}} {}\n",
            escape_latex(&category.name),
            escape_latex(&category.skills.join(", ")),
        ));
    }
    out.push_str("\\end{itemize}\n\\end{rSection}\n");

    section_start(&mut out, "PROJECTS");
    for project in &sections.projects {
        out.push_str(&format!("\\textbf{{{}}}", escape_latex(&project.name)));
        if let Some(link) = project.link.as_deref().filter(|l| !l.is_empty()) {
            out.push_str(&format!(" \\href{{{}}}{{(Live Link)}}", escape_url(link)));
        }
        out.push_str(&format!(
            "\n\\hfill \\textbf{{{}}}\n\\vspace{{-2mm}}\n",
            escape_latex(&project.technologies.join(", ")),
        ));
        bullet_list(&mut out, &project.bullets);
    }
    out.push_str("\\end{rSection}\n");

    section_start(&mut out, "PROFESSIONAL EXPERIENCE");
    for exp in &sections.experiences {
        out.push_str(&format!(
            "\\textbf{{{}}} \\hfill \\textbf{{{} -- {}}}\\\\\n",
            escape_latex(&exp.title),
            escape_latex(&exp.start_date),
            escape_latex(&exp.end_date),
        ));
        out.push_str(&format!(
            "\\textit{{{} \\hfill {}}}\\\\\n",
            escape_latex(&exp.company),
            escape_latex(&exp.location),
        ));
        bullet_list(&mut out, &exp.bullets);
    }
    out.push_str("\\end{rSection}\n");

    section_start(&mut out, "SUMMARY");
    bullet_list(&mut out, [&sections.summary.content]);
    out.push_str("\\end{rSection}\n\n\\end{document}\n");

    out
}
