// Built-in content served when the remote store is empty or unreachable.

use super::entities::{
    BadgeItem, Certification, CertificationStack, ContentBundle, Experience, MediaItem, MediaType,
    Photo, Post, Profile, Project, Talk, ToolSection, PROFILE_ID,
};

fn badge(id: &str, label: &str, href: &str) -> BadgeItem {
    BadgeItem {
        id: id.to_string(),
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn experience(
    id: &str,
    role: &str,
    company: &str,
    href: Option<&str>,
    location: &str,
    period: &str,
    description: &str,
) -> Experience {
    Experience {
        id: id.to_string(),
        role: role.to_string(),
        company: company.to_string(),
        href: href.map(str::to_string),
        location: location.to_string(),
        period: period.to_string(),
        description: description.to_string(),
    }
}

fn certification(
    id: &str,
    name: &str,
    issuer: &str,
    date: &str,
    description: &str,
    credential_link: &str,
) -> Certification {
    Certification {
        id: id.to_string(),
        name: name.to_string(),
        issuer: issuer.to_string(),
        date: date.to_string(),
        description: description.to_string(),
        credential_link: Some(credential_link.to_string()),
        stack: CertificationStack::Engineering,
    }
}

pub fn default_profile() -> Profile {
    Profile {
        id: PROFILE_ID.to_string(),
        name: "Abdiel John Wilson".to_string(),
        bio_title: "Hey there. I’m Abdiel, an open source aficionado and a software engineer"
            .to_string(),
        affiliations: vec![badge("1", "RkyConsults", "https://nuxtlabs.com")],
        core_team: vec![
            badge("1", "Softsuite Academy", "#"),
            badge("2", "Notion Uniuyo", "#"),
        ],
        maintaining: vec![badge(
            "3",
            "laravel-stubber",
            "https://packagist.org/packages/wilsn/laravel-stubber",
        )],
        created_projects: vec![badge(
            "1",
            "laravel-stubber",
            "https://packagist.org/packages/wilsn/laravel-stubber",
        )],
        experiences: vec![
            experience(
                "1",
                "Backend Developer",
                "HiTechSecurity",
                Some("#"),
                "Uyo, Nigeria (Contract)",
                "May 2025 – June 2025",
                "Engineered a security alert system using Laravel and built a Node.js WebSocket server for real-time communication between mobile apps and IoT security devices.",
            ),
            experience(
                "2",
                "Junior Full-Stack Developer",
                "Medinfocard (iCardServices)",
                Some("https://medinfocard.org/"),
                "Uyo, Nigeria (Part-time)",
                "February 2025 – May 2025",
                "Developed a patient information management system using Vue.js and Laravel. Introduced unit and feature tests to legacy codebase and refactored components to align with SOLID principles.",
            ),
            experience(
                "3",
                "Full-stack Developer",
                "Nosufer",
                Some("https://nosufer.com/"),
                "Uyo, Nigeria (Freelance)",
                "September 2024 – August 2025",
                "Developed backend architecture for four applications using Laravel and built frontend interfaces for two applications using Vue.js. Managed VPS deployment and server configuration.",
            ),
            experience(
                "4",
                "Web Developer",
                "AnHourWithAManager",
                Some("https://www.anhourwithamanager.com/"),
                "Lagos, Nigeria (Contract)",
                "October 2024 – December 2024",
                "Built and integrated new features into a podcast website using PHP, HTML, and Bootstrap. Designed and deployed a no-code landing page for user registration.",
            ),
            experience(
                "5",
                "Backend Intern",
                "HNG Internship",
                Some("#"),
                "Remote",
                "July 2024 – August 2024",
                "Collaborated in Agile teams to deliver two MVPs. Designed and implemented backend features and RESTful APIs using Laravel with PostgreSQL.",
            ),
            experience(
                "6",
                "Academy Lead",
                "Softsuite.ng",
                Some("https://softsuite.ng/"),
                "Uyo, Nigeria",
                "January 2025 – Present",
                "Oversee day-to-day operations of the tech academy. Manage and coordinate a team of tutors.",
            ),
            experience(
                "7",
                "Web Developer",
                "Softsuite.ng",
                Some("https://softsuite.ng/"),
                "Uyo, Nigeria (Zero-Hours)",
                "July 2022 – Present",
                "Contributed to client-facing web applications. Trained 26+ students in HTML, CSS, and JavaScript.",
            ),
            experience(
                "8",
                "Freelance Developer",
                "Self-Employed",
                None,
                "Remote",
                "2016 – Present",
                "Worked on various freelance web development projects, building websites and web applications for clients across different industries.",
            ),
            experience(
                "9",
                "Learning & Development",
                "Self-Study",
                None,
                "Nigeria",
                "2012 – Present",
                "Self-taught programming journey, learning web development fundamentals including HTML, CSS, JavaScript.",
            ),
        ],
        certifications: vec![
            certification(
                "1",
                "Responsive Web Design",
                "FreeCodeCamp",
                "Issued 2022",
                "Designed and built responsive web projects.",
                "https://www.freecodecamp.org/certification/wilsonabdiel/responsive-web-design",
            ),
            certification(
                "2",
                "Introduction to Computer Science",
                "HarvardX",
                "Issued 2022",
                "Foundational computer science principles and programming.",
                "https://certificates.cs50.io/6f25f207-48b3-4a06-844c-91eb20e30053.pdf?size=letter",
            ),
            certification(
                "3",
                "HNG Finalist Certificate",
                "HNG Internship",
                "Issued 2024",
                "Completed intensive software engineering internship program.",
                "https://certgo.app/c-230b1235",
            ),
            certification(
                "4",
                "HNG Certificate of Proficiency in Backend Development",
                "HNG Internship",
                "Issued 2024",
                "Demonstrated proficiency in backend development with Laravel and PostgreSQL.",
                "https://certgo.app/c-1c98a45e",
            ),
        ],
    }
}

pub fn default_posts() -> Vec<Post> {
    vec![
        Post {
            id: "why-i-moved-to-tokyo".to_string(),
            slug: Some("why-i-moved-to-tokyo".to_string()),
            title: "Why I moved to Tokyo".to_string(),
            date: "Oct 12, 2024".to_string(),
            duration: "12 min".to_string(),
            categories: vec!["life".to_string(), "travel".to_string()],
            content: Some(
                "# Moving to Tokyo\n\nMoving to Tokyo was one of the biggest decisions of my life. The energy here is different.\n\n### The Vibe\nIt's a blend of **high-tech efficiency** and deep-rooted traditions.\n\n- Exploring local coffee shops\n- Vibrant tech community\n- Quiet parks and shrines"
                    .to_string(),
            ),
        },
        Post {
            id: "reimagining-atomic-css".to_string(),
            slug: Some("reimagining-atomic-css".to_string()),
            title: "Reimagining Atomic CSS".to_string(),
            date: "Aug 24, 2024".to_string(),
            duration: "25 min".to_string(),
            categories: vec!["tech".to_string(), "css".to_string(), "tooling".to_string()],
            content: Some(
                "# Reimagining Atomic CSS\n\nAtomic CSS has changed how we think about styling.\n\n> Performance is key.\n\n```css\n.u-btn {\n  @apply px-4 py-2 bg-blue-500 text-white rounded;\n}\n```"
                    .to_string(),
            ),
        },
    ]
}

pub fn default_projects() -> Vec<Project> {
    Vec::new()
}

pub fn default_talks() -> Vec<Talk> {
    vec![Talk {
        id: "1".to_string(),
        title: "Data Made Simple: Notion Database for Non-Techies".to_string(),
        event: "Notion Uniuyo workshops 2024".to_string(),
        date: "April 8th, 2025".to_string(),
        link: "#".to_string(),
        location: Some("Google Meet".to_string()),
    }]
}

pub fn default_media() -> Vec<MediaItem> {
    vec![MediaItem {
        id: "1".to_string(),
        title: "Exploring the future of Vue with Abdiel John Wilson".to_string(),
        link: "#".to_string(),
        kind: MediaType::Podcast,
    }]
}

pub fn default_photos() -> Vec<Photo> {
    let photo = |id: &str, url: &str, caption: &str| Photo {
        id: id.to_string(),
        url: url.to_string(),
        caption: caption.to_string(),
    };
    vec![
        photo(
            "1",
            "https://images.unsplash.com/photo-1503899036084-c55cdd92da26?auto=format&fit=crop&q=80&w=800",
            "Tokyo Streets",
        ),
        photo(
            "2",
            "https://images.unsplash.com/photo-1590254350314-e6962f27521a?auto=format&fit=crop&q=80&w=800",
            "Osaka After Rain",
        ),
        photo(
            "3",
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?auto=format&fit=crop&q=80&w=800",
            "Workspace V2",
        ),
    ]
}

pub fn default_tool_sections() -> Vec<ToolSection> {
    vec![
        ToolSection {
            id: "1".to_string(),
            title: "Environment".to_string(),
            items: vec![
                "Editor: VS Code".to_string(),
                "Theme: Vitesse".to_string(),
                "Font: Iosevka Abdiel".to_string(),
                "Terminal: Warp".to_string(),
            ],
        },
        ToolSection {
            id: "2".to_string(),
            title: "Hardware".to_string(),
            items: vec![
                "MacBook Pro 14\" M3 Max".to_string(),
                "HHKB Professional HYBRID Type-S".to_string(),
                "Logitech MX Master 3S".to_string(),
            ],
        },
    ]
}

/// Every category at its built-in default.
pub fn default_bundle() -> ContentBundle {
    ContentBundle {
        profile: default_profile(),
        posts: default_posts(),
        projects: default_projects(),
        talks: default_talks(),
        media: default_media(),
        photos: default_photos(),
        tool_sections: default_tool_sections(),
    }
}
