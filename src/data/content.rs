//! Static content tables - topics, post templates, simulated users

use serde::{Deserialize, Serialize};

use crate::core::types::Topic;

/// Post templates grouped under one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCategory {
    pub name: String,
    pub templates: Vec<String>,
}

/// Maps template text to a topic when any keyword appears in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRule {
    pub keywords: Vec<String>,
    pub topic: String,
}

impl TopicRule {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

/// A simulated network member who writes auto-posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub role: String,
}

/// A post present in the feed when the game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPost {
    pub author: String,
    pub role: String,
    pub content: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub category: String,
}

/// Follower-count achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub count: u64,
    pub title: String,
    #[serde(default)]
    pub icon: String,
}

pub fn default_topics() -> Vec<Topic> {
    [
        ("AI & Technology", "🤖", "Industry Insight"),
        ("Remote Work", "💻", "Industry Insight"),
        ("Leadership", "👑", "Thought Leadership"),
        ("Team Building", "🤝", "Team Appreciation"),
        ("Innovation", "💡", "Thought Leadership"),
        ("Career Growth", "📈", "Personal Win"),
        ("Sustainability", "🌱", "Industry Insight"),
        ("Mentorship", "🎯", "Thought Leadership"),
        ("Work-Life Balance", "⚖️", "Industry Insight"),
        ("Digital Marketing", "📱", "Industry Insight"),
        ("Data Analytics", "📊", "Industry Insight"),
        ("Customer Success", "⭐", "Personal Win"),
    ]
    .into_iter()
    .map(|(name, emoji, category)| Topic::new(name, emoji, category))
    .collect()
}

pub fn default_categories() -> Vec<ContentCategory> {
    let category = |name: &str, templates: &[&str]| ContentCategory {
        name: name.into(),
        templates: templates.iter().map(|t| t.to_string()).collect(),
    };

    vec![
        category(
            "Thought Leadership",
            &[
                "After 5 years in tech, I've learned that the most important skill isn't coding, it's listening. What's the most valuable lesson your career has taught you?",
                "Unpopular opinion: The best leaders aren't the ones with all the answers. They're the ones asking the right questions. Thoughts?",
                "I used to think networking was about collecting business cards. Now I know it's about collecting meaningful conversations. How has your perspective on networking evolved?",
            ],
        ),
        category(
            "Personal Win",
            &[
                "Excited to announce that I've just completed my certification in Digital Marketing! Grateful for the support from my amazing team throughout this journey. 🎉",
                "Just hit a major milestone - our team delivered the project 2 weeks ahead of schedule! Proud of what we can accomplish when we work together.",
                "Thrilled to share that I've been promoted to Senior Analyst! Looking forward to taking on new challenges and growing with this incredible company.",
            ],
        ),
        category(
            "Industry Insight",
            &[
                "AI is transforming how we approach customer service, but the human touch remains irreplaceable. The future belongs to companies that blend technology with empathy.",
                "Remote work isn't just a trend, it's a fundamental shift in how we think about productivity and work-life balance. What changes have you noticed in your industry?",
                "Sustainability isn't just good for the planet; it's becoming a competitive advantage. Companies that ignore this shift do so at their own peril.",
            ],
        ),
        category(
            "Team Appreciation",
            &[
                "Shoutout to my incredible team for pulling together on this quarter's biggest launch! Sarah (design magic), Mike (dev wizardry), and Lisa (project management perfection). We couldn't have done it without each of you! 🙌",
                "Friday recognition post: Huge thanks to the marketing team for their creativity and dedication. Your innovative campaigns are what make our company shine!",
                "Grateful to work alongside such talented professionals. Today our team hit 95% customer satisfaction - a true testament to everyone's hard work and commitment to excellence.",
            ],
        ),
    ]
}

/// Keyword rules, checked in order; first match wins
pub fn default_topic_rules() -> Vec<TopicRule> {
    let rule = |keywords: &[&str], topic: &str| TopicRule {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        topic: topic.into(),
    };

    vec![
        rule(&["AI", "technology"], "AI & Technology"),
        rule(&["remote", "work-life"], "Remote Work"),
        rule(&["leader", "Leader"], "Leadership"),
        rule(&["team", "Team"], "Team Building"),
        rule(&["networking", "mentor"], "Mentorship"),
        rule(&["growth", "milestone", "promoted"], "Career Growth"),
    ]
}

pub fn default_personas() -> Vec<Persona> {
    [
        ("Jennifer Walsh", "Marketing Director"),
        ("David Kim", "Software Engineer"),
        ("Rachel Thompson", "HR Manager"),
        ("Michael Chen", "Sales Lead"),
        ("Lisa Garcia", "UX Designer"),
        ("James Wilson", "Data Analyst"),
        ("Amanda Foster", "Product Manager"),
        ("Kevin Rodriguez", "Business Analyst"),
        ("Samantha Lee", "Operations Manager"),
        ("Robert Taylor", "Technical Writer"),
    ]
    .into_iter()
    .map(|(name, role)| Persona {
        name: name.into(),
        role: role.into(),
    })
    .collect()
}

pub fn default_auto_posts() -> Vec<String> {
    [
        "Just completed an amazing workshop on digital transformation! The future of work is evolving rapidly, and I'm excited to implement these new strategies with my team.",
        "Reflecting on Q4 goals and feeling grateful for the incredible team I work with. Together, we've exceeded expectations and set the bar high for next year!",
        "Anyone else finding that remote collaboration tools have completely changed how we approach project management? The productivity gains have been remarkable.",
        "Attended an insightful conference today about sustainable business practices. It's inspiring to see how companies are prioritizing both profit and purpose.",
        "Big shoutout to my colleague for their innovative approach to solving our biggest client challenge. Teamwork really does make the dream work! 🙌",
        "The intersection of AI and human creativity continues to fascinate me. We're living in such an exciting time for technological advancement.",
        "Just hit a major milestone in our current project! Sometimes the best solutions come from taking a step back and approaching problems from a fresh angle.",
        "Mentor Monday: Remember that every expert was once a beginner. Embrace the learning process and don't be afraid to ask questions. Growth happens outside your comfort zone.",
        "Coffee chat with industry leaders always leaves me energized and full of new ideas. The power of networking and genuine conversations cannot be overstated.",
        "Celebrating our team's latest product launch! From concept to deployment, this has been an incredible journey of collaboration and innovation.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_seed_posts() -> Vec<SeedPost> {
    vec![
        SeedPost {
            author: "Sarah Chen".into(),
            role: "Senior Designer".into(),
            content: "Just wrapped up an amazing design sprint! There's something magical about watching ideas transform into beautiful, functional products. What's been inspiring you at work lately?".into(),
            likes: 127,
            comments: 23,
            shares: 8,
            category: "Personal Win".into(),
        },
        SeedPost {
            author: "Marcus Johnson".into(),
            role: "Product Manager".into(),
            content: "Unpopular opinion: The best product features are often the ones you remove, not the ones you add. Simplicity beats complexity every time.".into(),
            likes: 89,
            comments: 34,
            shares: 15,
            category: "Thought Leadership".into(),
        },
        SeedPost {
            author: "Emma Rodriguez".into(),
            role: "Data Scientist".into(),
            content: "AI and machine learning are incredible tools, but they're only as good as the questions we ask them. The future belongs to curious minds.".into(),
            likes: 203,
            comments: 67,
            shares: 31,
            category: "Industry Insight".into(),
        },
    ]
}

pub fn default_milestones() -> Vec<Milestone> {
    [
        (100, "First 100 Followers", "🎯"),
        (500, "Rising Influencer", "⭐"),
        (1_000, "Thought Leader", "🧠"),
        (5_000, "Industry Expert", "👑"),
    ]
    .into_iter()
    .map(|(count, title, icon)| Milestone {
        count,
        title: title.into(),
        icon: icon.into(),
    })
    .collect()
}
