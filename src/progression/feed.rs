//! The post feed, most recent first

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::types::{Millis, PostId, Topic};

/// Where a post came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostOrigin {
    /// Present when the session started
    Seeded,
    /// Written by the player
    Player,
    /// Written by a simulated network member
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: String,
    pub role: String,
    pub content: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub liked: bool,
    pub commented: bool,
    pub category: String,
    pub topic: Option<Topic>,
    pub origin: PostOrigin,
    pub created_at: Millis,
    /// Player posts get their engagement filled in once, after a delay
    pub engagement_resolved: bool,
}

/// Ordered posts, newest at the front
#[derive(Debug, Clone, Default)]
pub struct Feed {
    posts: VecDeque<Post>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend without truncating (player posts)
    pub fn push_front(&mut self, post: Post) {
        self.posts.push_front(post);
    }

    /// Prepend and drop the oldest posts beyond `capacity` (auto-posts)
    pub fn push_front_bounded(&mut self, post: Post, capacity: usize) -> Vec<Post> {
        self.posts.push_front(post);
        let mut dropped = Vec::new();
        while self.posts.len() > capacity {
            if let Some(oldest) = self.posts.pop_back() {
                dropped.push(oldest);
            }
        }
        dropped
    }

    /// Seeded posts keep their listed order
    pub fn push_back(&mut self, post: Post) {
        self.posts.push_back(post);
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn unliked_count(&self) -> usize {
        self.posts.iter().filter(|p| !p.liked).count()
    }

    /// Like the first `n` unliked posts in feed order; returns their ids
    pub(crate) fn like_first_unliked(&mut self, n: usize) -> Vec<PostId> {
        let mut liked = Vec::with_capacity(n);
        for post in self.posts.iter_mut().filter(|p| !p.liked).take(n) {
            post.liked = true;
            post.likes += 1;
            liked.push(post.id);
        }
        liked
    }
}
