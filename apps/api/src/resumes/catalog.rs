use std::sync::OnceLock;

use crate::models::resume::Resume;

fn sample(
    n: u8,
    title: &str,
    summary: &str,
    skills: &[&str],
    experience: &str,
    category: &str,
) -> Resume {
    Resume {
        id: format!("sample-{n}"),
        title: title.to_string(),
        summary: summary.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience: experience.to_string(),
        category: category.to_string(),
        full_text: format!("Sample resume {n} full text"),
        html: String::new(),
    }
}

/// The sample résumés, built once.
pub fn sample_resumes() -> &'static [Resume] {
    static SAMPLES: OnceLock<Vec<Resume>> = OnceLock::new();
    SAMPLES.get_or_init(|| {
        vec![
            sample(
                1,
                "Développeur Frontend",
                "Développeur React spécialisé en interfaces performantes.",
                &["React", "TypeScript", "CSS"],
                "3 years",
                "IT",
            ),
            sample(
                2,
                "Data Analyst Junior",
                "Analyste de données avec Excel et SQL.",
                &["SQL", "Python", "Tableau"],
                "2 years",
                "Data",
            ),
            sample(
                3,
                "Chef de Projet",
                "Gestion de projets IT et coordination d'équipes.",
                &["Gestion", "Agile", "Communication"],
                "5 years",
                "Management",
            ),
            sample(
                4,
                "Designer UX",
                "Conception d'interfaces centrées utilisateur.",
                &["Figma", "UX Research", "Prototyping"],
                "4 years",
                "Design",
            ),
            sample(
                5,
                "Technicien Réseau",
                "Administration réseaux et support.",
                &["TCP/IP", "Firewall", "Linux"],
                "6 years",
                "IT",
            ),
        ]
    })
}

pub fn find_resume(id: &str) -> Option<&'static Resume> {
    sample_resumes().iter().find(|r| r.id == id)
}
