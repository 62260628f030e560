//! Canned practice questions and the naive answer checker.
//!
//! Answers are compared as text only; nothing here touches the store.

use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CORRECT_MESSAGE: &str = "Great job! Your query is correct.";
pub const INCORRECT_MESSAGE: &str = "Not quite right. Your query doesn't match the expected solution.";
pub const QUESTION_NOT_FOUND_MESSAGE: &str = "Practice question not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(SandboxError::Validation(format!(
                "Unknown difficulty '{}'. Expected one of: easy, medium, hard",
                other
            ))),
        }
    }
}

/// One question of the bank. The expected answer and the model solution are
/// never serialized with the question itself.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeQuestion {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub hint: &'static str,
    #[serde(skip)]
    pub expected: &'static str,
    #[serde(skip)]
    pub solution: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub message: String,
}

static QUESTIONS: [PracticeQuestion; 8] = [
    PracticeQuestion {
        id: 1,
        title: "List All Users",
        description: "Write a query to retrieve all users from the database.",
        difficulty: Difficulty::Easy,
        hint: "Use the SELECT * statement with the users table.",
        expected: "SELECT * FROM users;",
        solution: "SELECT * FROM users;",
    },
    PracticeQuestion {
        id: 2,
        title: "Find Users Over 30",
        description: "Find all users who are over 30 years old.",
        difficulty: Difficulty::Easy,
        hint: "Use the WHERE clause with the age column to filter users.",
        expected: "SELECT * FROM users WHERE age > 30;",
        solution: "SELECT * FROM users WHERE age > 30;",
    },
    PracticeQuestion {
        id: 3,
        title: "Count Products by Category",
        description: "Count how many products are in each category.",
        difficulty: Difficulty::Medium,
        hint: "Use GROUP BY with the COUNT() function.",
        expected: "SELECT category_id, COUNT(*) FROM products GROUP BY category_id;",
        solution: "SELECT category_id, COUNT(*) as product_count\nFROM products\nGROUP BY category_id;",
    },
    PracticeQuestion {
        id: 4,
        title: "Find Top 5 Expensive Products",
        description: "Find the 5 most expensive products in the database.",
        difficulty: Difficulty::Medium,
        hint: "Use the ORDER BY and LIMIT clauses.",
        expected: "SELECT * FROM products ORDER BY price DESC LIMIT 5;",
        solution: "SELECT * FROM products\nORDER BY price DESC\nLIMIT 5;",
    },
    PracticeQuestion {
        id: 5,
        title: "User Orders with Product Names",
        description: "List all orders with user names and the products they ordered.",
        difficulty: Difficulty::Hard,
        hint: "You need to JOIN three tables: users, orders, and order_items with products.",
        expected: "SELECT users.name, products.name FROM users \
                   JOIN orders ON users.id = orders.user_id \
                   JOIN order_items ON orders.id = order_items.order_id \
                   JOIN products ON order_items.product_id = products.id;",
        solution: "SELECT \n  users.name as user_name, \n  products.name as product_name,\n  \
                   order_items.quantity,\n  orders.order_date\nFROM users \n\
                   JOIN orders ON users.id = orders.user_id\n\
                   JOIN order_items ON orders.id = order_items.order_id\n\
                   JOIN products ON order_items.product_id = products.id;",
    },
    PracticeQuestion {
        id: 6,
        title: "Department Salary Statistics",
        description: "Calculate the minimum, maximum, and average salary for each department.",
        difficulty: Difficulty::Hard,
        hint: "Use GROUP BY with multiple aggregate functions (MIN, MAX, AVG).",
        expected: "SELECT department_id, MIN(salary), MAX(salary), AVG(salary) \
                   FROM employees GROUP BY department_id;",
        solution: "SELECT \n  departments.name as department_name,\n  MIN(salary) as min_salary,\n  \
                   MAX(salary) as max_salary,\n  AVG(salary) as avg_salary,\n  \
                   COUNT(*) as employee_count\nFROM employees\n\
                   JOIN departments ON employees.department_id = departments.id\n\
                   GROUP BY departments.name\nORDER BY avg_salary DESC;",
    },
    PracticeQuestion {
        id: 7,
        title: "Recent Orders with Status",
        description: "Find the 10 most recent orders and their status.",
        difficulty: Difficulty::Medium,
        hint: "Use the ORDER BY clause with a date column and LIMIT.",
        expected: "SELECT * FROM orders ORDER BY order_date DESC LIMIT 10;",
        solution: "SELECT \n  orders.id,\n  users.name as customer_name,\n  orders.order_date,\n  \
                   orders.status,\n  orders.total_amount\nFROM orders\n\
                   JOIN users ON orders.user_id = users.id\n\
                   ORDER BY orders.order_date DESC\nLIMIT 10;",
    },
    PracticeQuestion {
        id: 8,
        title: "Customers with No Orders",
        description: "Find all users who have not placed any orders.",
        difficulty: Difficulty::Medium,
        hint: "Use a LEFT JOIN with a WHERE clause to find NULL values.",
        expected: "SELECT * FROM users LEFT JOIN orders ON users.id = orders.user_id \
                   WHERE orders.id IS NULL;",
        solution: "SELECT \n  users.id,\n  users.name,\n  users.email\nFROM users\n\
                   LEFT JOIN orders ON users.id = orders.user_id\n\
                   WHERE orders.id IS NULL;",
    },
];

/// Questions in bank order, optionally restricted to one difficulty.
pub fn questions(difficulty: Option<Difficulty>) -> Vec<&'static PracticeQuestion> {
    QUESTIONS
        .iter()
        .filter(|q| difficulty.is_none() || difficulty == Some(q.difficulty))
        .collect()
}

pub fn find(id: u32) -> Result<&'static PracticeQuestion> {
    QUESTIONS
        .iter()
        .find(|q| q.id == id)
        .ok_or_else(|| SandboxError::NotFound(QUESTION_NOT_FOUND_MESSAGE.to_string()))
}

/// Compare an answer against the expected text of question `id`.
///
/// Both sides are lower-cased with whitespace runs collapsed. The answer is
/// accepted when it equals the expected text, or when it contains the
/// expected text with its first `;` removed.
pub fn check_answer(id: u32, answer: &str) -> Result<AnswerFeedback> {
    let question = find(id)?;
    if answer.trim().is_empty() {
        return Err(SandboxError::missing_query());
    }

    let answer = simplify(answer);
    let expected = simplify(question.expected);
    let correct = answer == expected || answer.contains(&expected.replacen(';', "", 1));

    Ok(AnswerFeedback {
        correct,
        message: if correct { CORRECT_MESSAGE } else { INCORRECT_MESSAGE }.to_string(),
    })
}

fn simplify(sql: &str) -> String {
    sql.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
