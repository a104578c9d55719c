/// Step-by-step help for filling in the form.
pub const INSTRUCTIONS: &str = "\
Step 1: Total Trip Booking Cost
  - Enter the cost of occupancy packages only
  - Do NOT include TPP (Trip Protection Plan) in this total
  - If there are multiple packages, add them together first

Step 2: Amount Paid
  - Go to the Transaction Summary
  - Locate the line labeled \u{201c}Amount Paid\u{201d}
  - Enter that amount

Step 3: TPP Cost
  - Enter the total cost of the Trip Protection Plan
  - If there are multiple TPPs, add them together before entering

Step 4: Deposit Amount
  - Log into WeTravel
  - Click \u{201c}View Payment Plan\u{201d}
  - Find and enter the client\u{2019}s deposit amount

Step 5: Calculate
  - Answer the last field and the refund appears below
";

/// Commands accepted at any field prompt.
pub const COMMANDS: &str = "\
Commands (type at any prompt):
  help   show these instructions
  theme  switch between light and dark mode
  clear  clear all fields and start over
  quit   close the calculator
";

pub fn instructions_title() -> &'static str {
    "Refund Calculator Instructions"
}
