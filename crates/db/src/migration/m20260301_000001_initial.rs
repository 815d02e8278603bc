//! Initial database migration.
//!
//! Creates all tables, enums, triggers, and seed data for the Sprout
//! backend.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & PROFILES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PROFILES_SQL).await?;

        // ============================================================
        // PART 3: TRANSACTIONS
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 4: GAMIFICATION
        // ============================================================
        db.execute_unprepared(CHECK_INS_SQL).await?;
        db.execute_unprepared(REWARDS_SQL).await?;
        db.execute_unprepared(USER_REWARDS_SQL).await?;

        // ============================================================
        // PART 5: FINANCIAL PLANS
        // ============================================================
        db.execute_unprepared(PLANS_SQL).await?;
        db.execute_unprepared(PLAN_NODES_SQL).await?;

        // ============================================================
        // PART 6: ADVISOR TASKS
        // ============================================================
        db.execute_unprepared(ADVISOR_SQL).await?;

        // ============================================================
        // PART 7: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 8: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_REWARDS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Transaction direction
CREATE TYPE transaction_type AS ENUM ('INCOME', 'EXPENSE');

-- Transaction category
CREATE TYPE transaction_category AS ENUM (
    'FOOD',
    'TRANSPORT',
    'SHOPPING',
    'ENTERTAINMENT',
    'BILLS',
    'HEALTHCARE',
    'EDUCATION',
    'INCOME',
    'SAVINGS',
    'OTHER'
);

-- Financial plan lifecycle
CREATE TYPE plan_status AS ENUM ('ACTIVE', 'ARCHIVED');

-- Plan node classification
CREATE TYPE node_type AS ENUM ('ACTION', 'ADJUSTMENT', 'MILESTONE');

-- Plan node progress
CREATE TYPE node_status AS ENUM ('PENDING', 'COMPLETED', 'SKIPPED');

-- Advisor task lifecycle
CREATE TYPE task_status AS ENUM ('PENDING', 'PROCESSING', 'COMPLETED', 'FAILED');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    total_points INTEGER NOT NULL DEFAULT 0 CHECK (total_points >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_users_username ON users(username);
CREATE INDEX idx_users_email ON users(email);
";

const PROFILES_SQL: &str = r"
CREATE TABLE profiles (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    age INTEGER,
    job VARCHAR(100),
    monthly_salary NUMERIC(15, 2) CHECK (monthly_salary >= 0),
    fixed_costs JSONB NOT NULL DEFAULT '{}',
    financial_goals JSONB NOT NULL DEFAULT '[]',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
    category transaction_category NOT NULL,
    transaction_type transaction_type NOT NULL,
    transaction_date TIMESTAMPTZ NOT NULL,
    description VARCHAR(500),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transactions_user_date ON transactions(user_id, transaction_date DESC);
CREATE INDEX idx_transactions_user_type ON transactions(user_id, transaction_type);
";

const CHECK_INS_SQL: &str = r"
CREATE TABLE daily_check_ins (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    check_in_date DATE NOT NULL,
    streak_count INTEGER NOT NULL CHECK (streak_count >= 1),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- One check-in per user per calendar day. Concurrent requests race
    -- on this constraint; exactly one insert wins.
    CONSTRAINT uq_check_ins_user_date UNIQUE (user_id, check_in_date)
);

CREATE INDEX idx_check_ins_user_date ON daily_check_ins(user_id, check_in_date DESC);
";

const REWARDS_SQL: &str = r"
CREATE TABLE rewards (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    cost_points INTEGER NOT NULL CHECK (cost_points > 0),
    image_url VARCHAR(500),
    description VARCHAR(500)
);
";

const USER_REWARDS_SQL: &str = r"
CREATE TABLE user_rewards (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    reward_id UUID NOT NULL REFERENCES rewards(id) ON DELETE CASCADE,
    claimed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_user_rewards_user ON user_rewards(user_id, claimed_at DESC);
";

const PLANS_SQL: &str = r"
CREATE TABLE financial_plans (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(200) NOT NULL,
    status plan_status NOT NULL DEFAULT 'ACTIVE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_plans_user_status ON financial_plans(user_id, status);
";

const PLAN_NODES_SQL: &str = r"
CREATE TABLE plan_nodes (
    id UUID PRIMARY KEY,
    plan_id UUID NOT NULL REFERENCES financial_plans(id) ON DELETE CASCADE,
    parent_node_id UUID REFERENCES plan_nodes(id) ON DELETE SET NULL,
    position INTEGER NOT NULL,
    title VARCHAR(200) NOT NULL,
    node_type node_type NOT NULL,
    target_amount NUMERIC(15, 2) CHECK (target_amount >= 0),
    current_amount NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (current_amount >= 0),
    status node_status NOT NULL DEFAULT 'PENDING',
    metadata JSONB NOT NULL DEFAULT '{}',
    deadline TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Chain order is explicit, not derived from parent pointers.
    CONSTRAINT uq_plan_nodes_position UNIQUE (plan_id, position)
);

CREATE INDEX idx_plan_nodes_plan ON plan_nodes(plan_id, position);
";

const ADVISOR_SQL: &str = r"
CREATE TABLE advisor_tasks (
    id UUID PRIMARY KEY,
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    status task_status NOT NULL DEFAULT 'PENDING',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE advisor_exchanges (
    id UUID PRIMARY KEY,
    task_id UUID NOT NULL REFERENCES advisor_tasks(id) ON DELETE CASCADE,
    plan TEXT,
    response_time_ms INTEGER NOT NULL DEFAULT 0,
    success_code INTEGER NOT NULL DEFAULT 0,
    error_message VARCHAR(1000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_advisor_exchanges_task ON advisor_exchanges(task_id, created_at DESC);
";

const TRIGGERS_SQL: &str = r"
-- Keep updated_at current on row updates
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_profiles_updated_at
    BEFORE UPDATE ON profiles
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_advisor_tasks_updated_at
    BEFORE UPDATE ON advisor_tasks
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const SEED_REWARDS_SQL: &str = r"
INSERT INTO rewards (id, name, cost_points, image_url, description) VALUES
    (gen_random_uuid(), 'Bronze Sprout Badge', 50,
     'https://cdn.sproutfin.app/rewards/bronze-badge.png',
     'Awarded for your first week of consistent tracking'),
    (gen_random_uuid(), 'Silver Sprout Badge', 150,
     'https://cdn.sproutfin.app/rewards/silver-badge.png',
     'One month of showing up for your money'),
    (gen_random_uuid(), 'Gold Sprout Badge', 400,
     'https://cdn.sproutfin.app/rewards/gold-badge.png',
     'A full quarter of daily habit building'),
    (gen_random_uuid(), 'Custom Garden Theme', 250,
     'https://cdn.sproutfin.app/rewards/garden-theme.png',
     'Unlock the lush garden look for your dashboard'),
    (gen_random_uuid(), 'Golden Watering Can', 600,
     'https://cdn.sproutfin.app/rewards/watering-can.png',
     'A rare 3D companion for dedicated savers');
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS advisor_exchanges CASCADE;
DROP TABLE IF EXISTS advisor_tasks CASCADE;
DROP TABLE IF EXISTS plan_nodes CASCADE;
DROP TABLE IF EXISTS financial_plans CASCADE;
DROP TABLE IF EXISTS user_rewards CASCADE;
DROP TABLE IF EXISTS rewards CASCADE;
DROP TABLE IF EXISTS daily_check_ins CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS profiles CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS task_status;
DROP TYPE IF EXISTS node_status;
DROP TYPE IF EXISTS node_type;
DROP TYPE IF EXISTS plan_status;
DROP TYPE IF EXISTS transaction_category;
DROP TYPE IF EXISTS transaction_type;
";
