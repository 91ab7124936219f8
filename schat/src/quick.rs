//! Canned conversation starters offered next to the chat box.

use crate::QuickResponse;

pub const QUICK_RESPONSES: [QuickResponse; 6] = [
    QuickResponse {
        id: "peace",
        label: "I need peace",
        prompt: "I am feeling anxious and overwhelmed. Can you help me find God's peace?",
    },
    QuickResponse {
        id: "strength",
        label: "Need strength",
        prompt: "I am going through a difficult time and need spiritual strength. Can you encourage me?",
    },
    QuickResponse {
        id: "forgiveness",
        label: "About forgiveness",
        prompt: "I am struggling with forgiveness. Can you help me understand God's perspective on forgiveness?",
    },
    QuickResponse {
        id: "growth",
        label: "Spiritual growth",
        prompt: "I want to grow closer to God. What practical steps can I take in my spiritual journey?",
    },
    QuickResponse {
        id: "purpose",
        label: "Finding purpose",
        prompt: "I feel lost and unsure about my purpose. Can you help me understand God's plan for my life?",
    },
    QuickResponse {
        id: "prayer",
        label: "Help with prayer",
        prompt: "I want to improve my prayer life. Can you guide me on how to pray more effectively?",
    },
];

pub fn quick_responses() -> &'static [QuickResponse] {
    &QUICK_RESPONSES
}
