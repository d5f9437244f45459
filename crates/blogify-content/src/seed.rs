//! The fixed sample posts a store starts from when nothing is persisted.

use chrono::{DateTime, Duration, Utc};

use blogify_types::{Category, Post, PostId};

struct SeedPost {
    id: &'static str,
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    author: &'static str,
    author_email: &'static str,
    category: Category,
    tags: &'static [&'static str],
    image: &'static str,
    likes: u64,
    views: u64,
    featured: bool,
}

const SEED: [SeedPost; 7] = [
    SeedPost {
        id: "1",
        title: "Getting Started with React Hooks",
        excerpt: "Learn how to use React Hooks to write cleaner and more maintainable React code.",
        content: r#"# Getting Started with React Hooks

React Hooks revolutionized the way we write React components. They allow us to use state and other React features in functional components.

## What are Hooks?

Hooks are functions that let you "hook into" React state and lifecycle features from function components. They were introduced in React 16.8.

## Common Hooks

### useState
The useState hook allows you to add state to functional components.

```javascript
const [count, setCount] = useState(0);
```

### useEffect
The useEffect hook lets you perform side effects in functional components.

```javascript
useEffect(() => {
  // Side effect code
}, [dependencies]);
```

## Benefits

- Cleaner code
- Better reusability
- Easier testing
- No more class components needed

Start using hooks today and see the difference!"#,
        author: "John Doe",
        author_email: "john@example.com",
        category: Category::Tech,
        tags: &["React", "JavaScript", "Web Development"],
        image: "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800",
        likes: 42,
        views: 1200,
        featured: true,
    },
    SeedPost {
        id: "2",
        title: "The Art of UI/UX Design",
        excerpt: "Explore the fundamentals of creating beautiful and user-friendly interfaces.",
        content: r#"# The Art of UI/UX Design

User Interface (UI) and User Experience (UX) design are crucial aspects of modern web development.

## Understanding UI vs UX

**UI Design** focuses on the visual elements users interact with.
**UX Design** focuses on the overall experience and usability.

## Key Principles

1. **Simplicity** - Keep designs clean and uncluttered
2. **Consistency** - Maintain design patterns throughout
3. **Accessibility** - Design for all users
4. **Feedback** - Provide clear user feedback

## Tools and Resources

- Figma for design
- Adobe XD for prototyping
- User testing for validation

Great design is invisible - users notice it when it's missing!"#,
        author: "Jane Smith",
        author_email: "jane@example.com",
        category: Category::Design,
        tags: &["UI/UX", "Design", "Web Design"],
        image: "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=800",
        likes: 38,
        views: 980,
        featured: true,
    },
    SeedPost {
        id: "3",
        title: "Mastering TypeScript in 2024",
        excerpt: "A comprehensive guide to TypeScript and its advanced features.",
        content: r#"# Mastering TypeScript in 2024

TypeScript has become the standard for large-scale JavaScript applications.

## Why TypeScript?

- Type safety
- Better IDE support
- Easier refactoring
- Self-documenting code

## Getting Started

Install TypeScript:
```bash
npm install -g typescript
```

Create a tsconfig.json file and start coding with types!

## Advanced Features

- Generics
- Decorators
- Advanced types
- Module system

TypeScript makes JavaScript development more robust and maintainable."#,
        author: "Mike Johnson",
        author_email: "mike@example.com",
        category: Category::Tech,
        tags: &["TypeScript", "Programming", "JavaScript"],
        image: "https://images.unsplash.com/photo-1516116216624-53e697fedbea?w=800",
        likes: 55,
        views: 1500,
        featured: false,
    },
    SeedPost {
        id: "4",
        title: "Healthy Lifestyle Tips",
        excerpt: "Simple tips to improve your daily lifestyle and well-being.",
        content: r#"# Healthy Lifestyle Tips

Maintaining a healthy lifestyle is essential for overall well-being.

## Key Areas

### Nutrition
- Eat balanced meals
- Stay hydrated
- Limit processed foods

### Exercise
- Regular physical activity
- Find activities you enjoy
- Stay consistent

### Mental Health
- Practice mindfulness
- Get enough sleep
- Manage stress

Remember, small changes lead to big results!"#,
        author: "Sarah Williams",
        author_email: "sarah@example.com",
        category: Category::Lifestyle,
        tags: &["Health", "Wellness", "Lifestyle"],
        image: "https://images.unsplash.com/photo-1490645935967-10de6ba17061?w=800",
        likes: 28,
        views: 750,
        featured: false,
    },
    SeedPost {
        id: "5",
        title: "Building RESTful APIs with Node.js",
        excerpt: "A step-by-step guide to creating RESTful APIs with Node.js.",
        content: r#"# Building RESTful APIs with Node.js

Learn how to create robust REST APIs using Node.js and Express.

## Setting Up

```bash
npm init -y
npm install express
```

## Best Practices

- Use proper HTTP methods
- Implement error handling
- Add authentication
- Document your API

## Testing

Always test your APIs thoroughly before deployment."#,
        author: "John Doe",
        author_email: "john@example.com",
        category: Category::Tutorial,
        tags: &["Node.js", "API", "Backend"],
        image: "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=800",
        likes: 33,
        views: 1100,
        featured: false,
    },
    SeedPost {
        id: "6",
        title: "CSS Grid vs Flexbox",
        excerpt: "When to reach for Grid, when to reach for Flexbox, and how they work together.",
        content: r#"# CSS Grid vs Flexbox

Both layout systems are built into every modern browser, but they solve different problems.

## Flexbox

Flexbox lays items out along a single axis.

```css
.toolbar {
  display: flex;
  gap: 1rem;
}
```

## Grid

Grid lays items out in two dimensions at once.

```css
.gallery {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
}
```

## Rule of Thumb

- One row or one column: Flexbox
- Rows and columns together: Grid

Most real pages use both."#,
        author: "Jane Smith",
        author_email: "jane@example.com",
        category: Category::Design,
        tags: &["CSS", "Web Design", "Layout"],
        image: "https://images.unsplash.com/photo-1507721999472-8ed4421c4af2?w=800",
        likes: 21,
        views: 640,
        featured: false,
    },
    SeedPost {
        id: "7",
        title: "Productive Remote Work Habits",
        excerpt: "Routines and boundaries that keep remote work sustainable.",
        content: r#"# Productive Remote Work Habits

Working from home removes the commute but also removes the structure an office provides.

## Set Boundaries

- Keep a dedicated workspace
- Start and stop at consistent times
- Turn off notifications after hours

## Stay Connected

- Schedule short check-ins with your team
- Prefer written updates for async work

## Take Breaks

Step away from the screen every hour. A short walk does more than another coffee."#,
        author: "Sarah Williams",
        author_email: "sarah@example.com",
        category: Category::Lifestyle,
        tags: &["Productivity", "Remote Work", "Lifestyle"],
        image: "https://images.unsplash.com/photo-1521898284481-a5ec348cb555?w=800",
        likes: 17,
        views: 520,
        featured: false,
    },
];

/// Build the seed dataset. Post `n` (1-based) is dated `n - 1` days before
/// `now`, so the collection is already newest-first.
pub fn seed_posts(now: DateTime<Utc>) -> Vec<Post> {
    SEED.iter()
        .enumerate()
        .map(|(age_days, s)| Post {
            id: PostId::from(s.id),
            title: s.title.to_string(),
            content: s.content.to_string(),
            excerpt: s.excerpt.to_string(),
            author: s.author.to_string(),
            author_email: s.author_email.to_string(),
            category: s.category,
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            image: Some(s.image.to_string()),
            published_at: now - Duration::days(age_days as i64),
            updated_at: None,
            likes: s.likes,
            views: s.views,
            featured: s.featured,
        })
        .collect()
}
