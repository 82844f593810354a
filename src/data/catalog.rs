//! Built-in trend catalog
//!
//! Stand-in for a real trend-detection feed. The six entries here seed
//! the state store when a client refreshes its trend collection.

use super::models::{Momentum, Trend};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The sample trend collection.
pub fn sample_trends() -> Vec<Trend> {
    vec![
        Trend {
            id: "1".to_string(),
            title: "AI Video Generation Tools Breakthrough".to_string(),
            description: "Revolutionary AI tools creating Hollywood-quality videos from text prompts"
                .to_string(),
            category: "Technology & AI".to_string(),
            viral_score: 94,
            momentum: Momentum::Rising,
            time_ago: "2 hours ago".to_string(),
            keywords: strings(&["AI video", "text to video", "content creation", "automation"]),
            why_trending: "Major tech companies just released competing video AI tools, causing massive buzz in creator communities.".to_string(),
            related_trends: strings(&["AI Content Creation", "Video Marketing Revolution"]),
            region: "Global".to_string(),
        },
        Trend {
            id: "2".to_string(),
            title: "10-Minute Morning Workout Trend".to_string(),
            description: "Quick morning routines gaining massive popularity for busy professionals"
                .to_string(),
            category: "Health & Fitness".to_string(),
            viral_score: 87,
            momentum: Momentum::Peak,
            time_ago: "1 hour ago".to_string(),
            keywords: strings(&["morning workout", "quick fitness", "busy lifestyle", "productivity"]),
            why_trending: "Influencers sharing time-efficient workouts as people return to busy work schedules.".to_string(),
            related_trends: strings(&["Productivity Hacks", "Wellness Trends"]),
            region: "Global".to_string(),
        },
        Trend {
            id: "3".to_string(),
            title: "One-Pot Meal Recipes Viral".to_string(),
            description: "Simple, minimal cleanup cooking videos exploding across platforms"
                .to_string(),
            category: "Food & Culinary".to_string(),
            viral_score: 91,
            momentum: Momentum::Rising,
            time_ago: "4 hours ago".to_string(),
            keywords: strings(&["one pot meals", "easy cooking", "minimal cleanup", "quick recipes"]),
            why_trending: "Busy families seeking simple cooking solutions driving engagement."
                .to_string(),
            related_trends: strings(&["Meal Prep Trends", "Budget Cooking"]),
            region: "Global".to_string(),
        },
        Trend {
            id: "4".to_string(),
            title: "Sustainable Fashion Revolution".to_string(),
            description: "Eco-friendly fashion brands and sustainable styling tips trending"
                .to_string(),
            category: "Fashion & Beauty".to_string(),
            viral_score: 82,
            momentum: Momentum::Rising,
            time_ago: "6 hours ago".to_string(),
            keywords: strings(&["sustainable fashion", "eco-friendly", "ethical brands", "secondhand"]),
            why_trending: "Climate consciousness driving fashion choices among Gen Z and millennials."
                .to_string(),
            related_trends: strings(&["Zero Waste Living", "Thrift Flips"]),
            region: "Global".to_string(),
        },
        Trend {
            id: "5".to_string(),
            title: "Remote Work Productivity Hacks".to_string(),
            description: "Digital nomads sharing workspace setups and productivity systems"
                .to_string(),
            category: "Business & Career".to_string(),
            viral_score: 78,
            momentum: Momentum::Peak,
            time_ago: "8 hours ago".to_string(),
            keywords: strings(&["remote work", "productivity", "digital nomad", "workspace"]),
            why_trending: "Return to hybrid work models sparking productivity optimization content."
                .to_string(),
            related_trends: strings(&["Work From Home", "Freelancer Tips"]),
            region: "Global".to_string(),
        },
        Trend {
            id: "6".to_string(),
            title: "Mindfulness for Entrepreneurs".to_string(),
            description: "Business leaders sharing meditation and stress management techniques"
                .to_string(),
            category: "Mental Health & Wellness".to_string(),
            viral_score: 85,
            momentum: Momentum::Rising,
            time_ago: "3 hours ago".to_string(),
            keywords: strings(&["mindfulness", "entrepreneur wellness", "stress management", "meditation"]),
            why_trending: "High-profile entrepreneurs openly discussing mental health driving conversation.".to_string(),
            related_trends: strings(&["CEO Wellness", "Business Burnout"]),
            region: "Global".to_string(),
        },
    ]
}

/// Niche categories offered during onboarding.
pub fn niche_categories() -> Vec<String> {
    strings(&[
        "Technology & AI",
        "Health & Fitness",
        "Food & Culinary",
        "Fashion & Beauty",
        "Business & Career",
        "Mental Health & Wellness",
        "Travel & Lifestyle",
        "Personal Finance",
        "Education & Learning",
        "Entertainment & Gaming",
        "Parenting & Family",
        "Home & Garden",
        "Sports & Recreation",
        "Art & Creativity",
        "Music & Audio",
    ])
}
